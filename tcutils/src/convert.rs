//! Conversions between plain time scalars.
//!
//! These work on positions that need not fall on a frame boundary. For
//! non-drop framerates real seconds and DAMF-seconds differ only by the
//! 1000/1001 ratio. For drop-frame framerates DAMF-seconds also count the
//! skipped frame numbers, so the conversion splits the value into a whole
//! frame and an in-frame fraction and adds or removes the skipped numbers
//! on the whole part.
//!
//! Sample positions are always anchored on the enclosing frame start, the
//! same one [`crate::frame_boundary::floor`] finds, so frame starts map onto
//! whole DAMF frames exactly and sample round trips are lossless.

use crate::dropframe;
use crate::frame_boundary::{frame_at_sample, frame_start_sample};
use crate::framerate::Framerate;
use crate::types::{DamfSeconds, Samplerate, Samples, Seconds};

/// Fractional frame positions this close to an integer are treated as exact.
const FRAME_SNAP_TOLERANCE: f64 = 1e-6;

/// Split a fractional frame position into whole frame and in-frame fraction.
fn split_frame_position(position: f64) -> (i64, f64) {
    let nearest = position.round();
    if (position - nearest).abs() < FRAME_SNAP_TOLERANCE {
        (nearest as i64, 0.0)
    } else {
        let whole = position.floor();
        (whole as i64, position - whole)
    }
}

/// Real seconds to DAMF-seconds.
#[must_use]
pub fn seconds_to_damf_seconds(framerate: Framerate, seconds: Seconds) -> DamfSeconds {
    let real = framerate.apply_ratio(seconds.value());
    if !framerate.is_drop_frame() {
        return DamfSeconds(real);
    }
    let frame_count = f64::from(framerate.frame_count());
    let (frame, fraction) = split_frame_position(real * frame_count);
    let index = dropframe::frames_to_counting_dropped(framerate, frame);
    DamfSeconds((index as f64 + fraction) / frame_count)
}

/// DAMF-seconds to real seconds.
#[must_use]
pub fn damf_seconds_to_seconds(framerate: Framerate, damf_seconds: DamfSeconds) -> Seconds {
    if !framerate.is_drop_frame() {
        return Seconds(framerate.apply_inverse_ratio(damf_seconds.value()));
    }
    let frame_count = f64::from(framerate.frame_count());
    let (index, fraction) = split_frame_position(damf_seconds.value() * frame_count);
    let frame = dropframe::counting_dropped_to_frames(framerate, index);
    Seconds(framerate.apply_inverse_ratio((frame as f64 + fraction) / frame_count))
}

/// Sample position to DAMF-seconds.
#[must_use]
pub fn samples_to_damf_seconds(framerate: Framerate, samples: Samples, samplerate: Samplerate) -> DamfSeconds {
    let position = samples.value();
    if !framerate.is_defined() {
        return DamfSeconds(position as f64 / samplerate.value());
    }

    let frame = frame_at_sample(framerate, position, samplerate);
    let start = frame_start_sample(framerate, frame, samplerate);
    let frame_count = f64::from(framerate.frame_count());
    let offset = framerate.apply_ratio((position - start) as f64) * frame_count / samplerate.value();
    let index = dropframe::frames_to_counting_dropped(framerate, frame);
    DamfSeconds((index as f64 + offset) / frame_count)
}

/// DAMF-seconds to sample position, rounded to the nearest sample.
#[must_use]
pub fn damf_seconds_to_samples(framerate: Framerate, damf_seconds: DamfSeconds, samplerate: Samplerate) -> Samples {
    if !framerate.is_defined() {
        return Samples((damf_seconds.value() * samplerate.value()).round() as i64);
    }

    let frame_count = f64::from(framerate.frame_count());
    let (index, fraction) = split_frame_position(damf_seconds.value() * frame_count);
    let frame = dropframe::counting_dropped_to_frames(framerate, index);
    let start = frame_start_sample(framerate, frame, samplerate);
    let offset = framerate.apply_inverse_ratio(fraction * samplerate.value() / frame_count);
    Samples(start + offset.round() as i64)
}

/// Real seconds to sample position, rounded to the nearest sample.
#[must_use]
pub fn seconds_to_samples(seconds: Seconds, samplerate: Samplerate) -> Samples {
    Samples((seconds.value() * samplerate.value()).round() as i64)
}

/// Sample position to real seconds.
#[must_use]
pub fn samples_to_seconds(samples: Samples, samplerate: Samplerate) -> Seconds {
    Seconds(samples.value() as f64 / samplerate.value())
}
