//! Drop-frame counting for 29.97DF and 30DF.
//!
//! Drop-frame timecode skips frame *numbers* so the printed clock tracks wall
//! time at 29.97 fps. The rules are:
//! - Skip frame numbers 0 and 1 at the start of each minute
//! - Except for minutes 0, 10, 20, 30, 40, 50
//!
//! Two frame counts appear throughout the crate. A *real* frame count is the
//! number of frames that actually elapsed. A *counting-dropped* frame count
//! also includes the skipped numbers, so it maps directly onto the printed
//! `hh:mm:ss;ff` digits. The helpers here translate between the two.

use crate::framerate::Framerate;
use serde::{Deserialize, Serialize};

/// Drop-frame configuration for a frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropFrameConfig {
    /// Number of frames dropped per minute (except every 10th minute)
    pub frames_dropped_per_minute: i64,
    /// Frame numbers per timecode second
    pub nominal_fps: i64,
    /// Real frames per 10 minutes
    pub frames_per_10_minutes: i64,
    /// Real frames in a minute that drops
    pub frames_per_minute: i64,
}

impl DropFrameConfig {
    /// Configuration shared by 29.97DF and 30DF.
    #[must_use]
    pub const fn for_30() -> Self {
        Self {
            frames_dropped_per_minute: 2,
            nominal_fps: 30,
            // 30 * 60 * 10 - 9 * 2
            frames_per_10_minutes: 17982,
            // 30 * 60 - 2
            frames_per_minute: 1798,
        }
    }

    /// Get the configuration for a frame rate, if it counts drop-frame.
    #[must_use]
    pub fn for_framerate(framerate: Framerate) -> Option<Self> {
        match framerate {
            Framerate::Fps29_97Df | Framerate::Fps30Df => Some(Self::for_30()),
            _ => None,
        }
    }

    /// Frame numbers skipped before the start of `total_minutes`.
    #[must_use]
    pub fn dropped_before_minute(&self, total_minutes: i64) -> i64 {
        self.frames_dropped_per_minute * (total_minutes - total_minutes / 10)
    }

    /// Frame numbers skipped before real frame `frame`.
    ///
    /// Adding the result to `frame` gives its counting-dropped index.
    #[must_use]
    pub fn dropped_before_frame(&self, frame: i64) -> i64 {
        let blocks = frame / self.frames_per_10_minutes;
        let remainder = frame % self.frames_per_10_minutes;
        let drop = self.frames_dropped_per_minute;
        blocks * drop * 9 + drop * ((remainder - drop) / self.frames_per_minute)
    }

    /// Whether `minutes:seconds;frames` names a skipped frame number.
    #[must_use]
    pub fn is_dropped(&self, minutes: u32, seconds: u32, frames: u32) -> bool {
        seconds == 0 && minutes % 10 != 0 && i64::from(frames) < self.frames_dropped_per_minute
    }
}

/// Check whether a unit combination is skipped under `framerate`.
///
/// Always false for framerates that do not count drop-frame.
#[must_use]
pub fn is_dropped_frame(framerate: Framerate, minutes: u32, seconds: u32, frames: u32) -> bool {
    DropFrameConfig::for_framerate(framerate)
        .is_some_and(|config| config.is_dropped(minutes, seconds, frames))
}

/// Move a skipped frame number forward to the first existing one.
#[must_use]
pub(crate) fn skip_dropped(framerate: Framerate, minutes: u32, seconds: u32, frames: u32) -> u32 {
    match DropFrameConfig::for_framerate(framerate) {
        Some(config) if config.is_dropped(minutes, seconds, frames) => {
            config.frames_dropped_per_minute as u32
        }
        _ => frames,
    }
}

/// Real frame count to counting-dropped index.
#[must_use]
pub fn frames_to_counting_dropped(framerate: Framerate, frames: i64) -> i64 {
    match DropFrameConfig::for_framerate(framerate) {
        Some(config) => frames.saturating_add(config.dropped_before_frame(frames)),
        None => frames,
    }
}

/// Counting-dropped index to real frame count.
#[must_use]
pub fn counting_dropped_to_frames(framerate: Framerate, counting_dropped: i64) -> i64 {
    match DropFrameConfig::for_framerate(framerate) {
        Some(config) => {
            let minutes = counting_dropped.div_euclid(config.nominal_fps * 60);
            counting_dropped - config.dropped_before_minute(minutes)
        }
        None => counting_dropped,
    }
}
