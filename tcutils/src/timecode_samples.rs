//! A timecode plus the samples elapsed inside its frame.

use crate::error::{Result, TimecodeError};
use crate::frame_boundary;
use crate::framerate::Framerate;
use crate::timecode::{RoundingMode, Timecode, WrapMode};
use crate::types::{Samplerate, Samples};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sample-accurate position as `hh:mm:ss:ff+n samples`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimecodeSamplesFields")]
pub struct TimecodeSamples {
    timecode: Timecode,
    remainder: Samples,
}

#[derive(Deserialize)]
struct TimecodeSamplesFields {
    timecode: Timecode,
    remainder: Samples,
}

impl TryFrom<TimecodeSamplesFields> for TimecodeSamples {
    type Error = TimecodeError;

    fn try_from(fields: TimecodeSamplesFields) -> Result<Self> {
        if !fields.timecode.is_set() {
            return Err(TimecodeError::NotSet);
        }
        if fields.remainder.value() < 0 {
            return Err(TimecodeError::negative_time("samples remainder"));
        }
        Ok(Self {
            timecode: fields.timecode,
            remainder: fields.remainder,
        })
    }
}

impl TimecodeSamples {
    /// Locate the frame containing `samples` and keep the offset into it.
    pub fn new(framerate: Framerate, samples: Samples, samplerate: Samplerate) -> Result<Self> {
        let timecode = Timecode::from_samples(
            framerate,
            samples,
            samplerate,
            RoundingMode::Truncate,
            WrapMode::default(),
        )?;
        let start = frame_boundary::floor(framerate, samples, samplerate);
        Ok(Self {
            timecode,
            remainder: Samples(samples.value() - start.value()),
        })
    }

    /// The enclosing frame.
    #[must_use]
    pub fn timecode(&self) -> &Timecode {
        &self.timecode
    }

    /// Samples since the start of the frame.
    #[must_use]
    pub fn remainder(&self) -> Samples {
        self.remainder
    }

    /// Render as text; with `show_zero_samples` off a zero remainder prints
    /// the bare timecode.
    #[must_use]
    pub fn format(&self, show_zero_samples: bool) -> String {
        if self.remainder.value() == 0 && !show_zero_samples {
            self.timecode.to_string()
        } else {
            format!("{}+{} samples", self.timecode, self.remainder)
        }
    }
}

impl fmt::Display for TimecodeSamples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(true))
    }
}
