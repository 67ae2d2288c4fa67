//! Snapping sample positions to frame boundaries.
//!
//! A frame boundary is the first sample of a frame: the real start time of the
//! frame multiplied by the samplerate, rounded half-up. Because 1000/1001 rates
//! and non-integral samples-per-frame make frame lengths differ by a sample,
//! boundaries are always computed from the frame index and never accumulated.
//!
//! With [`Framerate::Undefined`] every sample is treated as a boundary.

use crate::framerate::Framerate;
use crate::types::{Samplerate, Samples};

/// Index of the real frame containing `samples`.
///
/// The half-sample estimate can land one frame late when a frame starts on an
/// exact half sample (24 fps at 44.1 kHz), or one frame early through float
/// error, so it is checked against the rounded frame starts.
pub(crate) fn frame_at_sample(framerate: Framerate, samples: i64, samplerate: Samplerate) -> i64 {
    let frames_per_sample = f64::from(framerate.frame_count()) / samplerate.value();
    let frame = (framerate.apply_ratio(samples as f64 + 0.5) * frames_per_sample).floor() as i64;
    if frame_start_sample(framerate, frame, samplerate) > samples {
        frame.saturating_sub(1)
    } else if frame_start_sample(framerate, frame.saturating_add(1), samplerate) <= samples {
        frame.saturating_add(1)
    } else {
        frame
    }
}

/// First sample of real frame `frame`.
pub(crate) fn frame_start_sample(framerate: Framerate, frame: i64, samplerate: Samplerate) -> i64 {
    let samples_per_frame = samplerate.value() / f64::from(framerate.frame_count());
    framerate
        .apply_inverse_ratio(frame as f64 * samples_per_frame)
        .round() as i64
}

/// Start sample of the frame containing `samples`.
#[must_use]
pub fn floor(framerate: Framerate, samples: Samples, samplerate: Samplerate) -> Samples {
    if !framerate.is_defined() {
        return samples;
    }
    let frame = frame_at_sample(framerate, samples.value(), samplerate);
    Samples(frame_start_sample(framerate, frame, samplerate))
}

/// `samples` itself if it is a boundary, else the start of the next frame.
#[must_use]
pub fn ceiling(framerate: Framerate, samples: Samples, samplerate: Samplerate) -> Samples {
    if !framerate.is_defined() {
        return samples;
    }
    let frame = frame_at_sample(framerate, samples.value(), samplerate);
    let start = frame_start_sample(framerate, frame, samplerate);
    if start == samples.value() {
        samples
    } else {
        Samples(frame_start_sample(framerate, frame.saturating_add(1), samplerate))
    }
}

/// The nearer of floor and the next frame start; ties go to the next frame.
#[must_use]
pub fn round(framerate: Framerate, samples: Samples, samplerate: Samplerate) -> Samples {
    if !framerate.is_defined() {
        return samples;
    }
    let frame = frame_at_sample(framerate, samples.value(), samplerate);
    let start = frame_start_sample(framerate, frame, samplerate);
    let next = frame_start_sample(framerate, frame.saturating_add(1), samplerate);
    if samples.value() - start < next - samples.value() {
        Samples(start)
    } else {
        Samples(next)
    }
}

/// Whether `samples` is the first sample of a frame.
#[must_use]
pub fn is_on_boundary(framerate: Framerate, samples: Samples, samplerate: Samplerate) -> bool {
    floor(framerate, samples, samplerate) == samples
}
