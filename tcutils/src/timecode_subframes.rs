//! A timecode plus a fraction of a frame.
//!
//! The fraction is `numerator / denominator` with `0 <= numerator < denominator`.
//! Common denominators are 80 (bits of an LTC frame) and 100.

use crate::error::{Result, TimecodeError};
use crate::frame_boundary;
use crate::framerate::Framerate;
use crate::timecode::{RoundingMode, Timecode, WrapMode};
use crate::types::{Samplerate, Samples};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Default separator between frames and subframes.
pub const DEFAULT_SUBFRAME_SEPARATOR: char = '.';

/// Timecode with subframe resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimecodeSubframesFields")]
pub struct TimecodeSubframes {
    timecode: Timecode,
    numerator: u32,
    denominator: u32,
}

#[derive(Deserialize)]
struct TimecodeSubframesFields {
    timecode: Timecode,
    numerator: u32,
    denominator: u32,
}

impl TryFrom<TimecodeSubframesFields> for TimecodeSubframes {
    type Error = TimecodeError;

    fn try_from(fields: TimecodeSubframesFields) -> Result<Self> {
        Self::new(fields.timecode, fields.numerator, fields.denominator)
    }
}

impl TimecodeSubframes {
    /// Attach an explicit subframe fraction to a timecode.
    pub fn new(timecode: Timecode, numerator: u32, denominator: u32) -> Result<Self> {
        if denominator <= 1 || numerator >= denominator {
            return Err(TimecodeError::invalid_subframes(
                i64::from(numerator),
                i64::from(denominator),
            ));
        }
        Ok(Self {
            timecode,
            numerator,
            denominator,
        })
    }

    /// Locate `samples` and express its offset in the frame in `denominator`ths.
    ///
    /// Offsets round half-up; one that rounds up to a whole frame becomes
    /// subframe 0 of the next frame.
    pub fn from_samples(
        framerate: Framerate,
        samples: Samples,
        samplerate: Samplerate,
        denominator: u32,
    ) -> Result<Self> {
        if denominator <= 1 {
            return Err(TimecodeError::invalid_subframes(0, i64::from(denominator)));
        }

        let mut timecode = Timecode::from_samples(
            framerate,
            samples,
            samplerate,
            RoundingMode::Truncate,
            WrapMode::default(),
        )?;
        let start = frame_boundary::floor(framerate, samples, samplerate).value();
        let end = frame_boundary::ceiling(framerate, Samples(samples.value() + 1), samplerate).value();
        let offset = samples.value() - start;
        let span = end - start;

        let denom = i64::from(denominator);
        let mut numerator = (denom * offset * 2 + span) / (span * 2);
        if numerator == denom {
            trace!(%timecode, offset, span, "subframe rounded into the next frame");
            numerator = 0;
            timecode = timecode.try_next()?;
        }

        Ok(Self {
            timecode,
            numerator: numerator as u32,
            denominator,
        })
    }

    /// The frame.
    #[must_use]
    pub fn timecode(&self) -> &Timecode {
        &self.timecode
    }

    /// Subframe numerator.
    #[must_use]
    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Subframe denominator.
    #[must_use]
    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Render as `hh:mm:ss:ff<separator>nn`.
    ///
    /// The numerator is zero padded to the width of `denominator - 1`. With
    /// `show_zero_subframes` off a zero numerator prints the bare timecode.
    #[must_use]
    pub fn format(&self, show_zero_subframes: bool, separator: char) -> String {
        if self.numerator == 0 && !show_zero_subframes {
            return self.timecode.to_string();
        }
        let width = (self.denominator - 1).to_string().len();
        format!(
            "{}{separator}{:0width$}",
            self.timecode, self.numerator
        )
    }
}

impl fmt::Display for TimecodeSubframes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(true, DEFAULT_SUBFRAME_SEPARATOR))
    }
}
