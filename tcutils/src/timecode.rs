//! SMPTE timecode as used in audio post-production.
//!
//! A [`Timecode`] is the printed `hh:mm:ss:ff` address of a frame on a given
//! [`Framerate`] grid. It can be built from unit values, text, a real frame
//! count, a sample position, real seconds or DAMF-seconds, and converts back
//! to each of them. The conversions are exact inverses of one another:
//! constructing from the output of `to_*` always reproduces the same timecode.

use crate::dropframe::{self, DropFrameConfig};
use crate::error::{Result, TimecodeError};
use crate::frame_boundary::{frame_at_sample, frame_start_sample};
use crate::framerate::Framerate;
use crate::types::{DamfSeconds, Frames, Samplerate, Samples, Seconds};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::{debug, trace};

/// Largest hours value (continue mode).
pub const MAX_HOURS: u32 = 99;

/// Hours after which wrap mode starts again at zero.
pub const HOURS_PER_DAY: u32 = 24;

/// Maximum minutes value.
pub const MAX_MINUTES: u32 = 59;

/// Maximum seconds value.
pub const MAX_SECONDS: u32 = 59;

/// First hours value continue mode cannot reach.
const HOUR_LIMIT: u32 = MAX_HOURS + 1;

const RENDER_CAPACITY: usize = 12;

/// What happens to the hours field past 23:59:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WrapMode {
    /// Hours wrap modulo 24.
    #[default]
    WrapAtMidnight,
    /// Hours keep counting up to 99.
    Continue,
}

/// How a time position between two frames is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Closest frame; a position exactly halfway goes to the later frame.
    #[default]
    Nearest,
    /// The frame containing the position.
    Truncate,
}

/// Lifecycle state of a [`Timecode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimecodeState {
    /// No framerate (default constructed).
    Invalid,
    /// Framerate known, digits unset (`--:--:--:--`).
    Unset,
    /// A real frame address.
    Set,
}

/// The four printed fields of a timecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct TimecodeUnits {
    /// Hours
    pub hours: u32,
    /// Minutes (0-59)
    pub minutes: u32,
    /// Seconds (0-59)
    pub seconds: u32,
    /// Frames (0 to frame count - 1)
    pub frames: u32,
}

impl TimecodeUnits {
    /// Bundle four unit values.
    #[must_use]
    pub const fn new(hours: u32, minutes: u32, seconds: u32, frames: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            frames,
        }
    }

    fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// SMPTE timecode on a fixed framerate grid.
///
/// Two timecodes are equal when they share a framerate and all four fields;
/// the wrap mode is not part of identity. Ordering operators (`<`, `>=`, ...)
/// panic when the framerates differ; use [`Timecode::try_cmp`] to get an
/// error instead.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(try_from = "TimecodeFields")]
pub struct Timecode {
    framerate: Framerate,
    wrap_mode: WrapMode,
    units: Option<TimecodeUnits>,
}

/// Serialized form of [`Timecode`], validated on the way in.
#[derive(Deserialize)]
struct TimecodeFields {
    framerate: Framerate,
    wrap_mode: WrapMode,
    units: Option<TimecodeUnits>,
}

impl TryFrom<TimecodeFields> for Timecode {
    type Error = TimecodeError;

    fn try_from(fields: TimecodeFields) -> Result<Self> {
        let Some(units) = fields.units else {
            return Ok(Self {
                framerate: fields.framerate,
                wrap_mode: fields.wrap_mode,
                units: None,
            });
        };
        if fields.wrap_mode == WrapMode::WrapAtMidnight && units.hours >= HOURS_PER_DAY {
            return Err(TimecodeError::value_out_of_range(
                "hours",
                units.hours,
                HOURS_PER_DAY - 1,
            ));
        }
        Self::from_units(fields.framerate, units, fields.wrap_mode)
    }
}

impl Timecode {
    /// Create a timecode from unit values, wrapping at midnight.
    ///
    /// # Example
    /// ```rust
    /// use tcutils::{Framerate, Timecode};
    ///
    /// let tc = Timecode::new(Framerate::Fps29_97Df, 0, 17, 1, 0).unwrap();
    /// assert_eq!(tc.to_string(), "00:17:01;00");
    /// assert_eq!(tc.to_frames().unwrap().value(), 30598);
    /// ```
    pub fn new(framerate: Framerate, hours: u32, minutes: u32, seconds: u32, frames: u32) -> Result<Self> {
        Self::from_units(
            framerate,
            TimecodeUnits::new(hours, minutes, seconds, frames),
            WrapMode::default(),
        )
    }

    /// Create a timecode from unit values with an explicit wrap mode.
    pub fn new_with_wrap_mode(
        framerate: Framerate,
        hours: u32,
        minutes: u32,
        seconds: u32,
        frames: u32,
        wrap_mode: WrapMode,
    ) -> Result<Self> {
        Self::from_units(
            framerate,
            TimecodeUnits::new(hours, minutes, seconds, frames),
            wrap_mode,
        )
    }

    /// Create a timecode from a [`TimecodeUnits`] bundle.
    ///
    /// In wrap mode the hours are reduced modulo 24 first. Fields beyond their
    /// modulus fail with `ValueOutOfRange`, skipped drop-frame numbers with
    /// `InvalidDropFrame`.
    pub fn from_units(framerate: Framerate, units: TimecodeUnits, wrap_mode: WrapMode) -> Result<Self> {
        if !framerate.is_defined() {
            return Err(TimecodeError::UndefinedFrameRate);
        }

        let mut units = units;
        if wrap_mode == WrapMode::WrapAtMidnight {
            units.hours %= HOURS_PER_DAY;
        }

        let frame_count = framerate.frame_count();
        if units.hours > MAX_HOURS {
            return Err(TimecodeError::value_out_of_range("hours", units.hours, MAX_HOURS));
        }
        if units.minutes > MAX_MINUTES {
            return Err(TimecodeError::value_out_of_range("minutes", units.minutes, MAX_MINUTES));
        }
        if units.seconds > MAX_SECONDS {
            return Err(TimecodeError::value_out_of_range("seconds", units.seconds, MAX_SECONDS));
        }
        if units.frames >= frame_count {
            return Err(TimecodeError::value_out_of_range("frames", units.frames, frame_count - 1));
        }
        if dropframe::is_dropped_frame(framerate, units.minutes, units.seconds, units.frames) {
            return Err(TimecodeError::invalid_drop_frame(
                units.minutes,
                units.seconds,
                units.frames,
            ));
        }

        Ok(Self {
            framerate,
            wrap_mode,
            units: Some(units),
        })
    }

    /// An unset timecode (`--:--:--:--`) on `framerate`.
    #[must_use]
    pub fn unset(framerate: Framerate) -> Self {
        Self::unset_with_wrap_mode(framerate, WrapMode::default())
    }

    /// An unset timecode with an explicit wrap mode.
    #[must_use]
    pub fn unset_with_wrap_mode(framerate: Framerate, wrap_mode: WrapMode) -> Self {
        Self {
            framerate,
            wrap_mode,
            units: None,
        }
    }

    /// Parse `hh:mm:ss:ff` text, wrapping at midnight.
    ///
    /// Drop-frame rates require `;` before the frames, rates above 100 fps
    /// three frame digits. All-hyphen fields give an unset timecode.
    pub fn parse(framerate: Framerate, text: &str) -> Result<Self> {
        Self::parse_with_wrap_mode(framerate, text, WrapMode::default())
    }

    /// Parse `hh:mm:ss:ff` text with an explicit wrap mode.
    pub fn parse_with_wrap_mode(framerate: Framerate, text: &str, wrap_mode: WrapMode) -> Result<Self> {
        if !framerate.is_defined() {
            return Err(TimecodeError::UndefinedFrameRate);
        }

        let bytes = text.as_bytes();
        let expected_len = RENDER_CAPACITY - 3 + frame_digits(framerate);
        if bytes.len() != expected_len {
            return Err(TimecodeError::string_parse(format!(
                "expected {expected_len} characters for {framerate} timecode, got '{text}'"
            )));
        }

        for (position, separator) in [(2, b':'), (5, b':'), (8, frame_separator(framerate))] {
            if bytes[position] != separator {
                return Err(TimecodeError::string_parse(format!(
                    "expected '{}' at position {position} in '{text}'",
                    separator as char
                )));
            }
        }

        let fields = [
            parse_field(&bytes[0..2], text)?,
            parse_field(&bytes[3..5], text)?,
            parse_field(&bytes[6..8], text)?,
            parse_field(&bytes[9..], text)?,
        ];
        match fields {
            [Some(hours), Some(minutes), Some(seconds), Some(frames)] => Self::from_units(
                framerate,
                TimecodeUnits::new(hours, minutes, seconds, frames),
                wrap_mode,
            ),
            [None, None, None, None] => Ok(Self::unset_with_wrap_mode(framerate, wrap_mode)),
            _ => Err(TimecodeError::PartiallyUnset),
        }
    }

    /// Create a timecode from a real frame count.
    pub fn from_frames(framerate: Framerate, frames: Frames, wrap_mode: WrapMode) -> Result<Self> {
        if frames.value() < 0 {
            return Err(TimecodeError::negative_time("frames"));
        }
        Self::from_real_frames(framerate, i64::from(frames.value()), wrap_mode)
    }

    /// Create a timecode from a sample position.
    pub fn from_samples(
        framerate: Framerate,
        samples: Samples,
        samplerate: Samplerate,
        rounding: RoundingMode,
        wrap_mode: WrapMode,
    ) -> Result<Self> {
        if !framerate.is_defined() {
            return Err(TimecodeError::UndefinedFrameRate);
        }
        let position = samples.value();
        if position < 0 {
            return Err(TimecodeError::negative_time("samples"));
        }

        let frame = frame_at_sample(framerate, position, samplerate);
        let frame = match rounding {
            RoundingMode::Truncate => frame,
            RoundingMode::Nearest => {
                let start = frame_start_sample(framerate, frame, samplerate);
                let next = frame_start_sample(framerate, frame.saturating_add(1), samplerate);
                if position - start < next - position {
                    frame
                } else {
                    frame.saturating_add(1)
                }
            }
        };
        Self::from_real_frames(framerate, frame, wrap_mode)
    }

    /// Create a timecode from real seconds.
    pub fn from_seconds(
        framerate: Framerate,
        seconds: Seconds,
        rounding: RoundingMode,
        wrap_mode: WrapMode,
    ) -> Result<Self> {
        if !framerate.is_defined() {
            return Err(TimecodeError::UndefinedFrameRate);
        }
        let time = seconds.value();
        if !time.is_finite() || time < 0.0 {
            return Err(TimecodeError::negative_time("seconds"));
        }
        let time = bound_time(
            time,
            real_seconds_in_hours(framerate, HOURS_PER_DAY),
            real_seconds_in_hours(framerate, HOUR_LIMIT),
            wrap_mode,
        )?;

        let frame_count = f64::from(framerate.frame_count());
        let scaled = framerate.apply_ratio(time) * frame_count;
        let frame = match rounding {
            RoundingMode::Nearest => scaled.round() as i64,
            RoundingMode::Truncate => {
                let frame = scaled.trunc() as i64;
                // to_seconds of the next frame may land exactly on `time`
                if framerate.apply_inverse_ratio((frame + 1) as f64 / frame_count) == time {
                    trace!(frame, time, "truncated seconds rounded up to next frame");
                    frame + 1
                } else {
                    frame
                }
            }
        };
        Self::from_real_frames(framerate, frame, wrap_mode)
    }

    /// Create a timecode from DAMF-seconds.
    ///
    /// DAMF-seconds count every frame number, dropped ones included, so the
    /// value maps straight onto the printed digits.
    pub fn from_damf_seconds(
        framerate: Framerate,
        damf_seconds: DamfSeconds,
        rounding: RoundingMode,
        wrap_mode: WrapMode,
    ) -> Result<Self> {
        if !framerate.is_defined() {
            return Err(TimecodeError::UndefinedFrameRate);
        }
        let time = damf_seconds.value();
        if !time.is_finite() || time < 0.0 {
            return Err(TimecodeError::negative_time("DAMF-seconds"));
        }
        let time = bound_time(
            time,
            f64::from(HOURS_PER_DAY * 3600),
            f64::from(HOUR_LIMIT * 3600),
            wrap_mode,
        )?;

        let frame_count = f64::from(framerate.frame_count());
        let scaled = time * frame_count;
        let index = match rounding {
            RoundingMode::Nearest => scaled.round() as i64,
            RoundingMode::Truncate => {
                let index = scaled.trunc() as i64;
                if (index + 1) as f64 / frame_count == time {
                    trace!(index, time, "truncated DAMF-seconds rounded up to next frame");
                    index + 1
                } else {
                    index
                }
            }
        };
        Self::from_counting_dropped(framerate, index, wrap_mode)
    }

    fn from_real_frames(framerate: Framerate, frames: i64, wrap_mode: WrapMode) -> Result<Self> {
        if !framerate.is_defined() {
            return Err(TimecodeError::UndefinedFrameRate);
        }
        let mut frames = frames;
        if frames >= real_frames_in_hours(framerate, HOUR_LIMIT) {
            match wrap_mode {
                WrapMode::WrapAtMidnight => {
                    frames = frames.rem_euclid(real_frames_in_hours(framerate, HOURS_PER_DAY));
                }
                WrapMode::Continue => {
                    let hours = frames / real_frames_in_hours(framerate, 1);
                    return Err(TimecodeError::value_out_of_range(
                        "hours",
                        u32::try_from(hours).unwrap_or(u32::MAX),
                        MAX_HOURS,
                    ));
                }
            }
        }
        let index = dropframe::frames_to_counting_dropped(framerate, frames);
        Self::from_counting_dropped(framerate, index, wrap_mode)
    }

    /// Split a counting-dropped index into unit fields.
    fn from_counting_dropped(framerate: Framerate, index: i64, wrap_mode: WrapMode) -> Result<Self> {
        let frame_count = i64::from(framerate.frame_count());
        let frames_per_minute = frame_count * 60;
        let frames_per_hour = frames_per_minute * 60;

        let mut hours = index / frames_per_hour;
        if wrap_mode == WrapMode::WrapAtMidnight {
            hours %= i64::from(HOURS_PER_DAY);
        }
        let remainder = index % frames_per_hour;
        let minutes = (remainder / frames_per_minute) as u32;
        let remainder = remainder % frames_per_minute;
        let seconds = (remainder / frame_count) as u32;
        let frames = dropframe::skip_dropped(
            framerate,
            minutes,
            seconds,
            (remainder % frame_count) as u32,
        );

        // callers bound `index` below 100 hours
        let units = TimecodeUnits::new(hours as u32, minutes, seconds, frames);
        Self::from_units(framerate, units, wrap_mode)
    }

    /// The framerate grid.
    #[must_use]
    pub fn framerate(&self) -> Framerate {
        self.framerate
    }

    /// The wrap mode used by construction and stepping.
    #[must_use]
    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap_mode
    }

    /// All four fields, or `None` when unset or invalid.
    #[must_use]
    pub fn units(&self) -> Option<TimecodeUnits> {
        self.units
    }

    /// Hours field.
    #[must_use]
    pub fn hours(&self) -> Option<u32> {
        self.units.map(|u| u.hours)
    }

    /// Minutes field.
    #[must_use]
    pub fn minutes(&self) -> Option<u32> {
        self.units.map(|u| u.minutes)
    }

    /// Seconds field.
    #[must_use]
    pub fn seconds(&self) -> Option<u32> {
        self.units.map(|u| u.seconds)
    }

    /// Frames field.
    #[must_use]
    pub fn frames(&self) -> Option<u32> {
        self.units.map(|u| u.frames)
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> TimecodeState {
        if !self.framerate.is_defined() {
            TimecodeState::Invalid
        } else if self.units.is_none() {
            TimecodeState::Unset
        } else {
            TimecodeState::Set
        }
    }

    /// Whether the framerate is defined.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.framerate.is_defined()
    }

    /// Whether the timecode names a frame.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.state() == TimecodeState::Set
    }

    fn set_units(&self) -> Result<TimecodeUnits> {
        self.units.ok_or(TimecodeError::NotSet)
    }

    /// Frame index counting dropped frame numbers.
    fn counting_dropped_index(units: TimecodeUnits, frame_count: i64) -> i64 {
        let total_seconds =
            (i64::from(units.hours) * 60 + i64::from(units.minutes)) * 60 + i64::from(units.seconds);
        total_seconds * frame_count + i64::from(units.frames)
    }

    fn real_frames(&self) -> Result<i64> {
        let units = self.set_units()?;
        let index = Self::counting_dropped_index(units, i64::from(self.framerate.frame_count()));
        let dropped = DropFrameConfig::for_framerate(self.framerate).map_or(0, |config| {
            config.dropped_before_minute(i64::from(units.hours) * 60 + i64::from(units.minutes))
        });
        Ok(index - dropped)
    }

    /// Real frames elapsed since 00:00:00:00.
    pub fn to_frames(&self) -> Result<Frames> {
        Ok(Frames(self.real_frames()? as i32))
    }

    /// Real seconds elapsed since 00:00:00:00.
    pub fn to_seconds(&self) -> Result<Seconds> {
        let frames = self.real_frames()? as f64;
        let frame_count = f64::from(self.framerate.frame_count());
        Ok(Seconds(self.framerate.apply_inverse_ratio(frames / frame_count)))
    }

    /// The printed digits read as seconds at an integral, non-dropping rate.
    pub fn to_damf_seconds(&self) -> Result<DamfSeconds> {
        let units = self.set_units()?;
        let frame_count = i64::from(self.framerate.frame_count());
        let index = Self::counting_dropped_index(units, frame_count);
        Ok(DamfSeconds(index as f64 / frame_count as f64))
    }

    /// First sample of this frame.
    pub fn to_samples(&self, samplerate: Samplerate) -> Result<Samples> {
        let frames = self.real_frames()?;
        Ok(Samples(frame_start_sample(self.framerate, frames, samplerate)))
    }

    /// The following frame, or `Overflow` past 99:59:59 in continue mode.
    pub fn try_next(&self) -> Result<Self> {
        let mut units = self.set_units()?;
        units.frames += 1;
        if units.frames == self.framerate.frame_count() {
            units.frames = 0;
            units.seconds += 1;
            if units.seconds > MAX_SECONDS {
                units.seconds = 0;
                units.minutes += 1;
                if units.minutes > MAX_MINUTES {
                    units.minutes = 0;
                    units.hours = match self.wrap_mode {
                        WrapMode::WrapAtMidnight => (units.hours + 1) % HOURS_PER_DAY,
                        WrapMode::Continue if units.hours < MAX_HOURS => units.hours + 1,
                        WrapMode::Continue => {
                            debug!(timecode = %self, "step past the last representable hour");
                            return Err(TimecodeError::Overflow);
                        }
                    };
                }
            }
        }
        units.frames = dropframe::skip_dropped(self.framerate, units.minutes, units.seconds, units.frames);
        Ok(Self {
            units: Some(units),
            ..*self
        })
    }

    /// The preceding frame, or `Underflow` before zero in continue mode.
    pub fn try_previous(&self) -> Result<Self> {
        let mut units = self.set_units()?;
        if self.wrap_mode == WrapMode::Continue && units.is_zero() {
            debug!(timecode = %self, "step before zero");
            return Err(TimecodeError::Underflow);
        }

        let lower_exists = units.frames > 0
            && !dropframe::is_dropped_frame(self.framerate, units.minutes, units.seconds, units.frames - 1);
        if lower_exists {
            units.frames -= 1;
        } else {
            units.frames = self.framerate.frame_count() - 1;
            if units.seconds > 0 {
                units.seconds -= 1;
            } else {
                units.seconds = MAX_SECONDS;
                if units.minutes > 0 {
                    units.minutes -= 1;
                } else {
                    units.minutes = MAX_MINUTES;
                    units.hours = if units.hours > 0 {
                        units.hours - 1
                    } else {
                        HOURS_PER_DAY - 1
                    };
                }
            }
        }
        Ok(Self {
            units: Some(units),
            ..*self
        })
    }

    /// The following frame.
    ///
    /// # Panics
    /// If the timecode is not set, or stepping past 99:59:59 in continue mode.
    #[must_use]
    pub fn next(&self) -> Self {
        match self.try_next() {
            Ok(tc) => tc,
            Err(err) => panic!("cannot step forward from {self}: {err}"),
        }
    }

    /// The preceding frame.
    ///
    /// # Panics
    /// If the timecode is not set, or stepping before zero in continue mode.
    #[must_use]
    pub fn previous(&self) -> Self {
        match self.try_previous() {
            Ok(tc) => tc,
            Err(err) => panic!("cannot step backward from {self}: {err}"),
        }
    }

    /// Compare two timecodes on the same framerate grid.
    ///
    /// Unset timecodes sort before every set one.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering> {
        if self.framerate != other.framerate {
            return Err(TimecodeError::frame_rate_mismatch(
                self.framerate.to_string(),
                other.framerate.to_string(),
            ));
        }
        Ok(self.units.cmp(&other.units))
    }

    /// Bytes [`Timecode::write_to`] needs, terminator included.
    #[must_use]
    pub fn required_buffer_len(&self) -> usize {
        RENDER_CAPACITY - 2 + frame_digits(self.framerate)
    }

    /// Render into a caller supplied buffer as NUL-terminated ASCII.
    ///
    /// Returns the text length, excluding the terminator. A buffer shorter than
    /// [`Timecode::required_buffer_len`] fails without writing anything.
    pub fn write_to(&self, buf: &mut [u8]) -> Result<usize> {
        let needed = self.required_buffer_len();
        if buf.len() < needed {
            return Err(TimecodeError::buffer_too_small(needed, buf.len()));
        }
        let (text, len) = self.render();
        buf[..len].copy_from_slice(&text[..len]);
        buf[len] = 0;
        Ok(len)
    }

    fn render(&self) -> ([u8; RENDER_CAPACITY], usize) {
        let digits = frame_digits(self.framerate);
        let len = RENDER_CAPACITY - 3 + digits;
        let mut text = [b'-'; RENDER_CAPACITY];
        text[2] = b':';
        text[5] = b':';
        text[8] = frame_separator(self.framerate);
        if let Some(units) = self.units {
            write_digits(&mut text[0..2], units.hours);
            write_digits(&mut text[3..5], units.minutes);
            write_digits(&mut text[6..8], units.seconds);
            write_digits(&mut text[9..len], units.frames);
        }
        (text, len)
    }
}

/// Real frames from midnight to `hours:00:00:00`.
fn real_frames_in_hours(framerate: Framerate, hours: u32) -> i64 {
    let counting = i64::from(hours) * 3600 * i64::from(framerate.frame_count());
    dropframe::counting_dropped_to_frames(framerate, counting)
}

/// Real seconds from midnight to `hours:00:00:00`.
fn real_seconds_in_hours(framerate: Framerate, hours: u32) -> f64 {
    let frames = real_frames_in_hours(framerate, hours) as f64;
    framerate.apply_inverse_ratio(frames / f64::from(framerate.frame_count()))
}

/// Keep a non-negative time below `limit`, the length of 100 hours.
///
/// Wrap mode folds it into one `day`; continue mode rejects it with the hour
/// count it would have reached.
fn bound_time(time: f64, day: f64, limit: f64, wrap_mode: WrapMode) -> Result<f64> {
    if time < limit {
        return Ok(time);
    }
    match wrap_mode {
        WrapMode::WrapAtMidnight => Ok(time % day),
        WrapMode::Continue => {
            let hours = (time / (limit / f64::from(HOUR_LIMIT))).floor() as u32;
            debug!(time, hours, "time beyond the last hour");
            Err(TimecodeError::value_out_of_range("hours", hours, MAX_HOURS))
        }
    }
}

fn frame_digits(framerate: Framerate) -> usize {
    if framerate.has_three_digit_frames() {
        3
    } else {
        2
    }
}

fn frame_separator(framerate: Framerate) -> u8 {
    if framerate.is_drop_frame() {
        b';'
    } else {
        b':'
    }
}

fn write_digits(dst: &mut [u8], value: u32) {
    let mut value = value;
    for slot in dst.iter_mut().rev() {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
}

fn parse_field(field: &[u8], text: &str) -> Result<Option<u32>> {
    if field.iter().all(|&b| b == b'-') {
        return Ok(None);
    }
    if !field.iter().all(u8::is_ascii_digit) {
        return Err(TimecodeError::string_parse(format!(
            "invalid digits in '{text}'"
        )));
    }
    Ok(Some(
        field
            .iter()
            .fold(0, |acc, &b| acc * 10 + u32::from(b - b'0')),
    ))
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (text, len) = self.render();
        let text = std::str::from_utf8(&text[..len]).map_err(|_| fmt::Error)?;
        f.write_str(text)
    }
}

impl PartialEq for Timecode {
    fn eq(&self, other: &Self) -> bool {
        self.framerate == other.framerate && self.units == other.units
    }
}

impl Eq for Timecode {}

impl Hash for Timecode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.framerate.hash(state);
        self.units.hash(state);
    }
}

impl PartialOrd for Timecode {
    /// # Panics
    /// If the framerates differ.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.try_cmp(other) {
            Ok(ordering) => Some(ordering),
            Err(err) => panic!("cannot order {self} against {other}: {err}"),
        }
    }
}
