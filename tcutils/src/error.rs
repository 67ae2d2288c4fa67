//! Error types for timecode operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for timecode operations.
pub type Result<T> = std::result::Result<T, TimecodeError>;

/// Errors that can occur during timecode operations.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimecodeError {
    /// Text could not be parsed as a framerate or timecode.
    #[error("Failed to parse: {message}")]
    StringParse {
        /// Description of the parse failure.
        message: String,
    },

    /// A timecode unit field exceeds its modulus.
    #[error("Timecode value out of range: {component} = {value} (max {max})")]
    ValueOutOfRange {
        /// Name of the field (hours, minutes, seconds, frames).
        component: String,
        /// The value that was provided.
        value: u32,
        /// The largest value the field accepts.
        max: u32,
    },

    /// The unit combination names a frame number skipped by drop-frame counting.
    #[error("Invalid drop-frame timecode: frame {frames} does not exist at {minutes:02}:{seconds:02}")]
    InvalidDropFrame {
        /// Minutes field.
        minutes: u32,
        /// Seconds field.
        seconds: u32,
        /// Frames field.
        frames: u32,
    },

    /// Some but not all unit fields were given as unset.
    #[error("Timecode is partially unset")]
    PartiallyUnset,

    /// No nominal framerate matches the requested value.
    #[error("Unsupported frame rate: {frame_rate} (drop-frame: {drop_frame})")]
    UnsupportedFrameRate {
        /// The requested frame rate.
        frame_rate: String,
        /// Whether drop-frame counting was requested.
        drop_frame: bool,
    },

    /// The operation requires a defined framerate.
    #[error("Frame rate is undefined")]
    UndefinedFrameRate,

    /// A negative or non-finite time position was given.
    #[error("Negative or non-finite {quantity} cannot be represented as a timecode")]
    NegativeTime {
        /// The kind of position (samples, seconds, ...).
        quantity: String,
    },

    /// The timecode is unset or invalid and has no time position.
    #[error("Timecode is not set")]
    NotSet,

    /// Stepping forward past the largest representable timecode.
    #[error("Timecode overflow")]
    Overflow,

    /// Stepping backward past 00:00:00:00.
    #[error("Timecode underflow")]
    Underflow,

    /// Frame rate mismatch in operation.
    #[error("Frame rate mismatch: {left} vs {right}")]
    FrameRateMismatch {
        /// The left operand's frame rate.
        left: String,
        /// The right operand's frame rate.
        right: String,
    },

    /// Subframe fraction outside `0 <= numerator < denominator`, `denominator > 1`.
    #[error("Invalid subframes: {numerator}/{denominator}")]
    InvalidSubframes {
        /// Subframe numerator.
        numerator: i64,
        /// Subframe denominator.
        denominator: i64,
    },

    /// The caller supplied render buffer is too short.
    #[error("Buffer too small: need {needed} bytes, got {available}")]
    BufferTooSmall {
        /// Bytes required including the terminator.
        needed: usize,
        /// Bytes supplied.
        available: usize,
    },
}

impl TimecodeError {
    /// Create a string parse error.
    pub fn string_parse(message: impl Into<String>) -> Self {
        Self::StringParse {
            message: message.into(),
        }
    }

    /// Create a value out of range error.
    pub fn value_out_of_range(component: impl Into<String>, value: u32, max: u32) -> Self {
        Self::ValueOutOfRange {
            component: component.into(),
            value,
            max,
        }
    }

    /// Create an invalid drop-frame error.
    pub fn invalid_drop_frame(minutes: u32, seconds: u32, frames: u32) -> Self {
        Self::InvalidDropFrame {
            minutes,
            seconds,
            frames,
        }
    }

    /// Create an unsupported frame rate error.
    pub fn unsupported_frame_rate(frame_rate: impl Into<String>, drop_frame: bool) -> Self {
        Self::UnsupportedFrameRate {
            frame_rate: frame_rate.into(),
            drop_frame,
        }
    }

    /// Create a negative time error.
    pub fn negative_time(quantity: impl Into<String>) -> Self {
        Self::NegativeTime {
            quantity: quantity.into(),
        }
    }

    /// Create a frame rate mismatch error.
    pub fn frame_rate_mismatch(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::FrameRateMismatch {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create an invalid subframes error.
    pub fn invalid_subframes(numerator: i64, denominator: i64) -> Self {
        Self::InvalidSubframes {
            numerator,
            denominator,
        }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::BufferTooSmall { needed, available }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display() {
        let err = TimecodeError::string_parse("expected ':' at position 2");
        assert_eq!(err.to_string(), "Failed to parse: expected ':' at position 2");

        let err = TimecodeError::value_out_of_range("minutes", 60, 59);
        assert_eq!(
            err.to_string(),
            "Timecode value out of range: minutes = 60 (max 59)"
        );

        let err = TimecodeError::invalid_drop_frame(1, 0, 0);
        assert_eq!(
            err.to_string(),
            "Invalid drop-frame timecode: frame 0 does not exist at 01:00"
        );

        let err = TimecodeError::Overflow;
        assert_eq!(err.to_string(), "Timecode overflow");
    }

    #[test]
    fn test_error_serialization() {
        let err = TimecodeError::buffer_too_small(13, 8);
        let json = serde_json::to_string(&err).unwrap();
        let decoded: TimecodeError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, decoded);
    }
}
