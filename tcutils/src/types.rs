//! Strongly typed scalar quantities.
//!
//! Sample positions, frame counts, real seconds and DAMF-seconds are all plain
//! numbers underneath, and mixing them up is the classic bug in timecode code.
//! Each one gets its own wrapper so they never convert into each other
//! implicitly; the engine in [`crate::timecode`] and [`crate::convert`] is the
//! only place that translates between them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fractional digits used when printing seconds.
pub const SECONDS_DISPLAY_PRECISION: usize = f64::DIGITS as usize + 1;

/// Audio sample rate in Hz.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Samplerate(pub f64);

impl Samplerate {
    /// 44.1 kHz.
    pub const HZ_44100: Self = Self(44_100.0);
    /// 48 kHz.
    pub const HZ_48000: Self = Self(48_000.0);
    /// 88.2 kHz.
    pub const HZ_88200: Self = Self(88_200.0);
    /// 96 kHz.
    pub const HZ_96000: Self = Self(96_000.0);
    /// 192 kHz.
    pub const HZ_192000: Self = Self(192_000.0);

    /// Get the rate in Hz.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Default for Samplerate {
    fn default() -> Self {
        Self::HZ_48000
    }
}

impl fmt::Display for Samplerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sample position from the start of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Samples(pub i64);

impl Samples {
    /// Get the sample position.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Samples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A count of real frames, not including drop-frame skipped numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Frames(pub i32);

impl Frames {
    /// Get the frame count.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Frames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Real elapsed seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Seconds(pub f64);

impl Seconds {
    /// Get the number of seconds.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(SECONDS_DISPLAY_PRECISION);
        write!(f, "{:.*}", precision, self.0)
    }
}

/// "Digits as measured in frames" seconds: the value printed on the timecode
/// read as if the frame rate were exactly integral and no frames were dropped.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct DamfSeconds(pub f64);

impl DamfSeconds {
    /// Get the number of DAMF-seconds.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for DamfSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(SECONDS_DISPLAY_PRECISION);
        write!(f, "{:.*}", precision, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_seconds_display_precision() {
        assert_eq!(Seconds(1.5).to_string(), "1.5000000000000000");
        assert_eq!(format!("{:.3}", Seconds(1.001)), "1.001");
        assert_eq!(DamfSeconds(3600.0).to_string(), "3600.0000000000000000");
    }

    #[test]
    fn test_integral_display() {
        assert_eq!(Samples(172_800_000).to_string(), "172800000");
        assert_eq!(Frames(-3).to_string(), "-3");
        assert_eq!(Samplerate::HZ_48000.to_string(), "48000");
    }

    #[test]
    fn test_samplerate_default() {
        assert_eq!(Samplerate::default(), Samplerate(48_000.0));
    }

    #[test]
    fn test_scalar_serialization() {
        let json = serde_json::to_string(&Samples(48_048)).unwrap();
        assert_eq!(json, "48048");
        let decoded: Seconds = serde_json::from_str("1.001").unwrap();
        assert_eq!(decoded, Seconds(1.001));
    }
}
