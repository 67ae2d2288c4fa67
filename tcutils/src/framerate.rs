//! Nominal framerates and their counting rules.
//!
//! Every framerate is one of a closed set of nominal rates. Each rate carries
//! three independent properties: the integer number of frame *numbers* per
//! timecode second, whether the real rate runs 1000/1001 slow, and whether
//! frame numbers are skipped (drop-frame counting). 30DF is the odd one out:
//! it drops frame numbers but runs at exactly 30 real frames per second.

use crate::error::{Result, TimecodeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum distance between a requested fps value and a nominal rate.
pub const FPS_TOLERANCE: f64 = 0.0001;

/// Supported framerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Framerate {
    /// 23.976 fps (24000/1001)
    Fps23_976,
    /// 24 fps
    Fps24,
    /// 25 fps
    Fps25,
    /// 29.97 fps (30000/1001), non-drop counting
    Fps29_97,
    /// 29.97 fps, drop-frame counting
    Fps29_97Df,
    /// 30 fps
    Fps30,
    /// 30 fps, drop-frame counting
    Fps30Df,
    /// 48 fps
    Fps48,
    /// 50 fps
    Fps50,
    /// 60 fps
    Fps60,
    /// 96 fps
    Fps96,
    /// 100 fps
    Fps100,
    /// 120 fps
    Fps120,
    /// No framerate. Timecodes carrying it are invalid.
    #[default]
    Undefined,
}

struct FramerateInfo {
    frame_count: u32,
    ratio_1001: bool,
    drop_frame: bool,
    name: &'static str,
    nominal_fps: f64,
}

const fn info(frame_count: u32, ratio_1001: bool, drop_frame: bool, name: &'static str, nominal_fps: f64) -> FramerateInfo {
    FramerateInfo {
        frame_count,
        ratio_1001,
        drop_frame,
        name,
        nominal_fps,
    }
}

const FPS_23_976: FramerateInfo = info(24, true, false, "23.976", 24.0 * 1000.0 / 1001.0);
const FPS_24: FramerateInfo = info(24, false, false, "24", 24.0);
const FPS_25: FramerateInfo = info(25, false, false, "25", 25.0);
const FPS_29_97: FramerateInfo = info(30, true, false, "29.97", 30.0 * 1000.0 / 1001.0);
const FPS_29_97_DF: FramerateInfo = info(30, true, true, "29.97df", 30.0 * 1000.0 / 1001.0);
const FPS_30: FramerateInfo = info(30, false, false, "30", 30.0);
const FPS_30_DF: FramerateInfo = info(30, false, true, "30df", 30.0);
const FPS_48: FramerateInfo = info(48, false, false, "48", 48.0);
const FPS_50: FramerateInfo = info(50, false, false, "50", 50.0);
const FPS_60: FramerateInfo = info(60, false, false, "60", 60.0);
const FPS_96: FramerateInfo = info(96, false, false, "96", 96.0);
const FPS_100: FramerateInfo = info(100, false, false, "100", 100.0);
const FPS_120: FramerateInfo = info(120, false, false, "120", 120.0);
const UNDEFINED: FramerateInfo = info(0, false, false, "", 0.0);

impl Framerate {
    /// All defined framerates, in ascending order.
    pub const ALL: [Framerate; 13] = [
        Self::Fps23_976,
        Self::Fps24,
        Self::Fps25,
        Self::Fps29_97,
        Self::Fps29_97Df,
        Self::Fps30,
        Self::Fps30Df,
        Self::Fps48,
        Self::Fps50,
        Self::Fps60,
        Self::Fps96,
        Self::Fps100,
        Self::Fps120,
    ];

    /// Iterate over all defined framerates in ascending order.
    ///
    /// Each call starts a fresh iteration; `Undefined` is never produced.
    pub fn values() -> impl Iterator<Item = Framerate> + Clone {
        Self::ALL.into_iter()
    }

    fn info(self) -> &'static FramerateInfo {
        match self {
            Self::Fps23_976 => &FPS_23_976,
            Self::Fps24 => &FPS_24,
            Self::Fps25 => &FPS_25,
            Self::Fps29_97 => &FPS_29_97,
            Self::Fps29_97Df => &FPS_29_97_DF,
            Self::Fps30 => &FPS_30,
            Self::Fps30Df => &FPS_30_DF,
            Self::Fps48 => &FPS_48,
            Self::Fps50 => &FPS_50,
            Self::Fps60 => &FPS_60,
            Self::Fps96 => &FPS_96,
            Self::Fps100 => &FPS_100,
            Self::Fps120 => &FPS_120,
            Self::Undefined => &UNDEFINED,
        }
    }

    /// Frame numbers per timecode second (0 for `Undefined`).
    #[must_use]
    pub fn frame_count(self) -> u32 {
        self.info().frame_count
    }

    /// Whether the real rate is the nominal rate times 1000/1001.
    #[must_use]
    pub fn is_ratio_1001(self) -> bool {
        self.info().ratio_1001
    }

    /// Whether frame numbers are skipped at minute boundaries.
    #[must_use]
    pub fn is_drop_frame(self) -> bool {
        self.info().drop_frame
    }

    /// Whether this is one of the 48 fps and above rates.
    #[must_use]
    pub fn is_high_framerate(self) -> bool {
        self.info().frame_count >= 48
    }

    /// Whether this is a real framerate rather than `Undefined`.
    #[must_use]
    pub fn is_defined(self) -> bool {
        self != Self::Undefined
    }

    /// Whether frame numbers need three digits when printed.
    #[must_use]
    pub fn has_three_digit_frames(self) -> bool {
        self.info().frame_count > 100
    }

    /// Canonical text form, e.g. `"29.97df"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.info().name
    }

    /// Real frames per second.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.info().nominal_fps
    }

    /// Scale a value from nominal to real time: `v * 1000 / 1001` for
    /// 1000/1001 rates, identity otherwise.
    #[must_use]
    pub fn apply_ratio(self, value: f64) -> f64 {
        if self.is_ratio_1001() {
            value * 1000.0 / 1001.0
        } else {
            value
        }
    }

    /// Inverse of [`Framerate::apply_ratio`]: `v * 1001 / 1000` for 1000/1001 rates.
    #[must_use]
    pub fn apply_inverse_ratio(self, value: f64) -> f64 {
        if self.is_ratio_1001() {
            value * 1001.0 / 1000.0
        } else {
            value
        }
    }

    /// Match a real fps value against the non-drop nominal rates.
    pub fn from_fps(fps: f64) -> Result<Self> {
        Self::from_fps_with_drop(fps, false)
    }

    /// Match a real fps value against the nominal rates.
    ///
    /// With `drop_frame` set only 29.97 and 30 match, yielding the drop-frame
    /// variants.
    pub fn from_fps_with_drop(fps: f64, drop_frame: bool) -> Result<Self> {
        Self::values()
            .filter(|rate| rate.is_drop_frame() == drop_frame)
            .find(|rate| (fps - rate.as_f64()).abs() < FPS_TOLERANCE)
            .ok_or_else(|| TimecodeError::unsupported_frame_rate(fps.to_string(), drop_frame))
    }
}

impl fmt::Display for Framerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framerate {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self> {
        let rate = match s {
            "23.976" => Self::Fps23_976,
            "24" => Self::Fps24,
            "25" => Self::Fps25,
            "29.97" => Self::Fps29_97,
            "29.97df" | "29.97DF" | "29.97 df" | "29.97 DF" => Self::Fps29_97Df,
            "30" => Self::Fps30,
            "30df" | "30DF" | "30 df" | "30 DF" => Self::Fps30Df,
            "48" => Self::Fps48,
            "50" => Self::Fps50,
            "60" => Self::Fps60,
            "96" => Self::Fps96,
            "100" => Self::Fps100,
            "120" => Self::Fps120,
            _ => {
                return Err(TimecodeError::string_parse(format!(
                    "unknown frame rate '{s}'"
                )))
            }
        };
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_frame_counts() {
        let counts: Vec<u32> = Framerate::values().map(Framerate::frame_count).collect();
        assert_eq!(counts, vec![24, 24, 25, 30, 30, 30, 30, 48, 50, 60, 96, 100, 120]);
        assert_eq!(Framerate::Undefined.frame_count(), 0);
    }

    #[test]
    fn test_flags() {
        let ratio: Vec<Framerate> = Framerate::values().filter(|r| r.is_ratio_1001()).collect();
        assert_eq!(
            ratio,
            vec![Framerate::Fps23_976, Framerate::Fps29_97, Framerate::Fps29_97Df]
        );

        let drop: Vec<Framerate> = Framerate::values().filter(|r| r.is_drop_frame()).collect();
        assert_eq!(drop, vec![Framerate::Fps29_97Df, Framerate::Fps30Df]);

        let high: Vec<Framerate> = Framerate::values()
            .filter(|r| r.is_high_framerate())
            .collect();
        assert_eq!(
            high,
            vec![
                Framerate::Fps48,
                Framerate::Fps50,
                Framerate::Fps60,
                Framerate::Fps96,
                Framerate::Fps100,
                Framerate::Fps120
            ]
        );

        assert!(!Framerate::Undefined.is_defined());
        assert!(!Framerate::Undefined.is_drop_frame());
    }

    #[test]
    fn test_values_restartable() {
        let first: Vec<Framerate> = Framerate::values().collect();
        let second: Vec<Framerate> = Framerate::values().collect();
        assert_eq!(first.len(), 13);
        assert_eq!(first, second);
        assert_eq!(first[0], Framerate::Fps23_976);
        assert_eq!(first[12], Framerate::Fps120);
    }

    #[test]
    fn test_string_round_trip() {
        for rate in Framerate::values() {
            assert_eq!(rate.to_string().parse::<Framerate>().unwrap(), rate);
        }
        assert_eq!(Framerate::Undefined.to_string(), "");
    }

    #[test]
    fn test_parse_drop_variants() {
        for token in ["29.97df", "29.97DF", "29.97 df", "29.97 DF"] {
            assert_eq!(token.parse::<Framerate>().unwrap(), Framerate::Fps29_97Df);
        }
        for token in ["30df", "30DF", "30 df", "30 DF"] {
            assert_eq!(token.parse::<Framerate>().unwrap(), Framerate::Fps30Df);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for token in ["", "29.970", "59.94", "24 ", "29.97Df", "dropframe"] {
            assert!(matches!(
                token.parse::<Framerate>(),
                Err(TimecodeError::StringParse { .. })
            ));
        }
    }

    #[test]
    fn test_from_fps() {
        assert_eq!(Framerate::from_fps(24.0).unwrap(), Framerate::Fps24);
        assert_eq!(Framerate::from_fps(23.976).unwrap(), Framerate::Fps23_976);
        assert_eq!(Framerate::from_fps(29.97).unwrap(), Framerate::Fps29_97);
        assert_eq!(Framerate::from_fps(30.0).unwrap(), Framerate::Fps30);
        assert_eq!(Framerate::from_fps(120.0).unwrap(), Framerate::Fps120);
        assert_eq!(
            Framerate::from_fps(24000.0 / 1001.0).unwrap(),
            Framerate::Fps23_976
        );
        assert_eq!(
            Framerate::from_fps_with_drop(29.97, true).unwrap(),
            Framerate::Fps29_97Df
        );
        assert_eq!(
            Framerate::from_fps_with_drop(30.0, true).unwrap(),
            Framerate::Fps30Df
        );
    }

    #[test]
    fn test_from_fps_rejects() {
        assert!(Framerate::from_fps(29.0).is_err());
        assert!(Framerate::from_fps(24.001).is_err());
        assert!(Framerate::from_fps_with_drop(24.0, true).is_err());
        assert!(Framerate::from_fps_with_drop(25.0, true).is_err());
        assert!(matches!(
            Framerate::from_fps_with_drop(60.0, true),
            Err(TimecodeError::UnsupportedFrameRate {
                drop_frame: true,
                ..
            })
        ));
    }

    #[test]
    fn test_apply_ratio() {
        assert_eq!(Framerate::Fps29_97.apply_ratio(1001.0), 1000.0);
        assert_eq!(Framerate::Fps29_97Df.apply_inverse_ratio(1000.0), 1001.0);
        assert_eq!(Framerate::Fps30Df.apply_ratio(1001.0), 1001.0);
        assert_eq!(Framerate::Fps25.apply_inverse_ratio(7.5), 7.5);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Framerate::Fps29_97Df).unwrap();
        let decoded: Framerate = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, Framerate::Fps29_97Df);
    }
}
