//! tcutility - convert one time value into every format tcutils handles.

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use console::style;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tcutils::{
    convert, DamfSeconds, Framerate, Frames, RoundingMode, Samplerate, Samples, Seconds, Timecode,
    TimecodeSubframes, WrapMode,
};
use tracing::debug;

/// Subframe resolution of the report.
const SUBFRAME_DENOMINATOR: u32 = 100;

/// Framerate used when none is given.
const DEFAULT_FRAMERATE: Framerate = Framerate::Fps24;

/// Most option tokens after the time: framerate, samplerate, rounding mode.
const MAX_OPTION_TOKENS: usize = 3;

/// Unsigned decimal, as accepted for samplerates and seconds.
const DECIMAL_PATTERN: &str = r"([0-9]+(?:[.][0-9]*)?|[.][0-9]+)";

/// Argument grammar, compiled on first use.
static GRAMMAR: LazyLock<Result<Grammar, regex::Error>> = LazyLock::new(Grammar::compile);

/// Patterns for the time argument and the samplerate option.
struct Grammar {
    timecode: Regex,
    real: Regex,
    damf: Regex,
    frames: Regex,
    sample: Regex,
    samplerate: Regex,
}

impl Grammar {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            timecode: Regex::new(r"^([0-9]{2}:[0-9]{2}:[0-9]{2}[:;][0-9]{2,3})$")?,
            real: Regex::new(&format!("^t_real={DECIMAL_PATTERN}$"))?,
            damf: Regex::new(&format!("^t_damf={DECIMAL_PATTERN}$"))?,
            frames: Regex::new(r"^frames=([0-9]+)$")?,
            sample: Regex::new(r"^sample=([0-9]+)$")?,
            samplerate: Regex::new(&format!("^{DECIMAL_PATTERN}$"))?,
        })
    }
}

fn grammar() -> anyhow::Result<&'static Grammar> {
    GRAMMAR
        .as_ref()
        .map_err(|err| anyhow!("invalid argument grammar: {err}"))
}

/// Command-line arguments for tcutility.
#[derive(Parser, Debug)]
#[command(name = "tcutility")]
#[command(version)]
#[command(about = "Convert a time into timecode, seconds, DAMF-seconds, samples and frames")]
#[command(long_about = "tcutility converts a single time value into all formats handled by tcutils.\n\n\
    TIME can be given as:\n    \
    hh:mm:ss:ff             timecode (';' before ff for drop-frame)\n    \
    t_real=floating-point   real-time in seconds\n    \
    t_damf=floating-point   DAMF-time in seconds\n    \
    frames=integer          frame count\n    \
    sample=integer          sample position\n\n\
    OPTIONS can follow in any order: a framerate (default 24), a samplerate\n\
    (default 48000) and a rounding mode, nearest (default) or truncate.\n\n\
    EXAMPLES:\n    \
    tcutility 01:00:00:00 29.97df\n    \
    tcutility sample=172799827 29.97df 48000 truncate\n    \
    tcutility t_damf=3600 30df --json")]
struct Args {
    /// Time to convert
    #[arg(required_unless_present = "list_framerates")]
    time: Option<String>,

    /// Framerate, samplerate and rounding mode, in any order
    options: Vec<String>,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// List the supported framerates and exit
    #[arg(long)]
    list_framerates: bool,
}

/// The time argument, classified by its prefix.
#[derive(Debug, Clone, PartialEq)]
enum TimeInput {
    Timecode(String),
    RealSeconds(f64),
    DamfSeconds(f64),
    Frames(i32),
    Sample(i64),
}

impl TimeInput {
    /// Match `text` against each accepted form.
    fn parse(text: &str) -> anyhow::Result<Self> {
        let grammar = grammar()?;

        if let Some(value) = first_group(&grammar.timecode, text) {
            return Ok(Self::Timecode(value.to_string()));
        }
        if let Some(value) = first_group(&grammar.real, text) {
            return Ok(Self::RealSeconds(value.parse().context("invalid t_real value")?));
        }
        if let Some(value) = first_group(&grammar.damf, text) {
            return Ok(Self::DamfSeconds(value.parse().context("invalid t_damf value")?));
        }
        if let Some(value) = first_group(&grammar.frames, text) {
            return Ok(Self::Frames(value.parse().context("frame count out of range")?));
        }
        if let Some(value) = first_group(&grammar.sample, text) {
            return Ok(Self::Sample(value.parse().context("sample position out of range")?));
        }
        bail!("failed to parse the time argument '{text}'")
    }

    /// What the input denotes, for the report header.
    fn description(&self) -> &'static str {
        match self {
            Self::Timecode(_) => "timecode",
            Self::RealSeconds(_) => "real-time in seconds",
            Self::DamfSeconds(_) => "DAMF-time in seconds",
            Self::Frames(_) => "frame count",
            Self::Sample(_) => "sample position",
        }
    }
}

fn first_group<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Conversion settings gathered from the option tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Settings {
    framerate: Framerate,
    samplerate: Samplerate,
    rounding: RoundingMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            framerate: DEFAULT_FRAMERATE,
            samplerate: Samplerate::default(),
            rounding: RoundingMode::default(),
        }
    }
}

impl Settings {
    /// Classify each token as framerate, rounding mode or samplerate.
    ///
    /// A token that parses as a framerate is one, so `24` is never a samplerate.
    fn from_tokens(tokens: &[String]) -> anyhow::Result<Self> {
        if tokens.len() > MAX_OPTION_TOKENS {
            bail!(
                "expected at most {MAX_OPTION_TOKENS} options after the time, got {}",
                tokens.len()
            );
        }

        let samplerate_re = &grammar()?.samplerate;
        let mut settings = Self::default();
        let (mut have_framerate, mut have_rounding, mut have_samplerate) = (false, false, false);

        for token in tokens {
            if let Ok(framerate) = token.parse::<Framerate>() {
                if have_framerate {
                    bail!("multiple arguments parsed as framerate");
                }
                settings.framerate = framerate;
                have_framerate = true;
            } else if let Some(rounding) = parse_rounding(token) {
                if have_rounding {
                    bail!("multiple arguments parsed as rounding-mode");
                }
                settings.rounding = rounding;
                have_rounding = true;
            } else if samplerate_re.is_match(token) {
                if have_samplerate {
                    bail!("multiple arguments parsed as samplerate");
                }
                let value: f64 = token.parse().context("invalid samplerate")?;
                if value <= 0.0 {
                    bail!("samplerate must be positive, got {token}");
                }
                settings.samplerate = Samplerate(value);
                have_samplerate = true;
            } else {
                bail!("invalid argument '{token}'");
            }
        }

        debug!(
            framerate = %settings.framerate,
            samplerate = %settings.samplerate,
            rounding = rounding_name(settings.rounding),
            "resolved settings"
        );
        Ok(settings)
    }
}

fn parse_rounding(token: &str) -> Option<RoundingMode> {
    match token {
        "nearest" => Some(RoundingMode::Nearest),
        "truncate" => Some(RoundingMode::Truncate),
        _ => None,
    }
}

fn rounding_name(rounding: RoundingMode) -> &'static str {
    match rounding {
        RoundingMode::Nearest => "nearest",
        RoundingMode::Truncate => "truncate",
    }
}

fn rounding_info(rounding: RoundingMode) -> &'static str {
    match rounding {
        RoundingMode::Nearest => "rounding to nearest frame",
        RoundingMode::Truncate => "truncating to frame below",
    }
}

/// One time value in every representation.
#[derive(Debug, Clone, Serialize)]
struct Report {
    /// What the input denotes.
    input_kind: &'static str,
    /// The input as it was used.
    input: String,
    framerate: String,
    samplerate: f64,
    rounding: &'static str,
    timecode: String,
    subframes: String,
    t_real: f64,
    t_damf: f64,
    sample: i64,
    frames: i32,
}

/// Convert `input` into a full report.
fn build_report(input: &TimeInput, settings: Settings) -> anyhow::Result<Report> {
    let Settings {
        framerate,
        samplerate,
        rounding,
    } = settings;
    let wrap = WrapMode::default();

    let (input_used, timecode, seconds, damf_seconds, samples): (String, Timecode, Seconds, DamfSeconds, Samples) =
        match input {
            TimeInput::Timecode(text) => {
                let mut text = text.clone();
                if framerate.is_drop_frame() {
                    text.replace_range(8..9, ";");
                }
                let tc = Timecode::parse(framerate, &text)
                    .with_context(|| format!("invalid timecode '{text}' at {framerate}"))?;
                (
                    tc.to_string(),
                    tc,
                    tc.to_seconds()?,
                    tc.to_damf_seconds()?,
                    tc.to_samples(samplerate)?,
                )
            }
            TimeInput::DamfSeconds(value) => {
                let damf = DamfSeconds(*value);
                let tc = Timecode::from_damf_seconds(framerate, damf, rounding, wrap)?;
                (
                    value.to_string(),
                    tc,
                    convert::damf_seconds_to_seconds(framerate, damf),
                    damf,
                    convert::damf_seconds_to_samples(framerate, damf, samplerate),
                )
            }
            TimeInput::RealSeconds(value) => {
                let seconds = Seconds(*value);
                let tc = Timecode::from_seconds(framerate, seconds, rounding, wrap)?;
                (
                    value.to_string(),
                    tc,
                    seconds,
                    convert::seconds_to_damf_seconds(framerate, seconds),
                    convert::seconds_to_samples(seconds, samplerate),
                )
            }
            TimeInput::Sample(value) => {
                let samples = Samples(*value);
                let tc = Timecode::from_samples(framerate, samples, samplerate, rounding, wrap)?;
                (
                    value.to_string(),
                    tc,
                    convert::samples_to_seconds(samples, samplerate),
                    convert::samples_to_damf_seconds(framerate, samples, samplerate),
                    samples,
                )
            }
            TimeInput::Frames(value) => {
                let tc = Timecode::from_frames(framerate, Frames(*value), wrap)?;
                (
                    value.to_string(),
                    tc,
                    tc.to_seconds()?,
                    tc.to_damf_seconds()?,
                    tc.to_samples(samplerate)?,
                )
            }
        };

    let subframes =
        TimecodeSubframes::from_samples(framerate, samples, samplerate, SUBFRAME_DENOMINATOR)?;
    debug!(%timecode, %subframes, %samples, "converted");

    Ok(Report {
        input_kind: input.description(),
        input: input_used,
        framerate: framerate.to_string(),
        samplerate: samplerate.value(),
        rounding: rounding_name(rounding),
        timecode: timecode.to_string(),
        subframes: subframes.to_string(),
        t_real: seconds.value(),
        t_damf: damf_seconds.value(),
        sample: samples.value(),
        frames: timecode.to_frames()?.value(),
    })
}

fn print_header() {
    println!();
    println!(
        "{} {}",
        style("tcutility").cyan().bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).white()
    );
    println!("Converts a given time into all formats handled by tcutils.");
    println!();
}

fn print_report(report: &Report, rounding: RoundingMode) {
    println!(
        "{} {} at framerate {} and samplerate {}",
        report.input_kind,
        style(&report.input).white().bold(),
        style(&report.framerate).white(),
        style(report.samplerate).white()
    );
    println!("corresponds with");
    println!();
    println!(
        " {} {} ({})",
        style("timecode:").cyan(),
        style(&report.timecode).green().bold(),
        rounding_info(rounding)
    );
    println!("           {} (subframes)", style(&report.subframes).green());
    println!("   {} {}", style("t_real:").cyan(), Seconds(report.t_real));
    println!("   {} {}", style("t_damf:").cyan(), DamfSeconds(report.t_damf));
    println!("   {} {}", style("sample:").cyan(), report.sample);
    println!("   {} {}", style("frames:").cyan(), report.frames);
    println!();
}

fn print_framerates(json: bool) -> anyhow::Result<()> {
    if json {
        let names: Vec<String> = Framerate::values().map(|rate| rate.to_string()).collect();
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }
    println!("{}", style("Framerates:").cyan().bold());
    for rate in Framerate::values() {
        let marker = if rate == DEFAULT_FRAMERATE { " (default)" } else { "" };
        println!("  {}{}", style(rate).white(), marker);
    }
    Ok(())
}

fn run(args: &Args) -> anyhow::Result<()> {
    if args.list_framerates {
        return print_framerates(args.json);
    }

    let Some(time) = args.time.as_deref() else {
        bail!("missing time argument");
    };
    let settings = Settings::from_tokens(&args.options)?;
    let input = TimeInput::parse(time)?;
    debug!(?input, "parsed time argument");

    let report = build_report(&input, settings)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_header();
        print_report(&report, settings.rounding);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging (not in JSON mode)
    if !args.json {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(if args.verbose {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            })
            .with_target(false)
            .with_writer(std::io::stderr)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    if let Err(e) = run(&args) {
        if args.json {
            let error = serde_json::json!({
                "type": "error",
                "message": format!("{e:#}"),
            });
            println!("{}", error);
        } else {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
        }
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    // ===== TimeInput tests =====

    #[test]
    fn test_parse_time_forms() {
        assert_eq!(
            TimeInput::parse("01:00:00:00").unwrap(),
            TimeInput::Timecode("01:00:00:00".into())
        );
        assert_eq!(
            TimeInput::parse("00:00:00;02").unwrap(),
            TimeInput::Timecode("00:00:00;02".into())
        );
        assert_eq!(TimeInput::parse("t_real=1.5").unwrap(), TimeInput::RealSeconds(1.5));
        assert_eq!(TimeInput::parse("t_damf=.5").unwrap(), TimeInput::DamfSeconds(0.5));
        assert_eq!(TimeInput::parse("t_damf=3600.").unwrap(), TimeInput::DamfSeconds(3600.0));
        assert_eq!(TimeInput::parse("frames=30598").unwrap(), TimeInput::Frames(30598));
        assert_eq!(TimeInput::parse("sample=48000").unwrap(), TimeInput::Sample(48000));
    }

    #[test]
    fn test_parse_time_rejects() {
        for text in ["1:00:00:00", "t_real=-1", "t_real=", "frames=1.5", "samples=1", "now"] {
            assert!(TimeInput::parse(text).is_err(), "{text}");
        }
    }

    #[test]
    fn test_grammar_compiled_once() {
        let first = grammar().unwrap();
        assert!(std::ptr::eq(first, grammar().unwrap()));
        assert!(first.samplerate.is_match("44100"));
        assert!(!first.samplerate.is_match("29.97df"));
    }

    // ===== Settings tests =====

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::from_tokens(&[]).unwrap();
        assert_eq!(settings.framerate, Framerate::Fps24);
        assert_eq!(settings.samplerate, Samplerate::HZ_48000);
        assert_eq!(settings.rounding, RoundingMode::Nearest);
    }

    #[test]
    fn test_settings_any_order() {
        let settings = Settings::from_tokens(&tokens(&["truncate", "96000", "29.97df"])).unwrap();
        assert_eq!(settings.framerate, Framerate::Fps29_97Df);
        assert_eq!(settings.samplerate, Samplerate::HZ_96000);
        assert_eq!(settings.rounding, RoundingMode::Truncate);
    }

    #[test]
    fn test_settings_framerate_wins_over_samplerate() {
        let settings = Settings::from_tokens(&tokens(&["25"])).unwrap();
        assert_eq!(settings.framerate, Framerate::Fps25);
        assert_eq!(settings.samplerate, Samplerate::HZ_48000);
    }

    #[test]
    fn test_settings_rejects_repeats() {
        assert!(Settings::from_tokens(&tokens(&["24", "25"])).is_err());
        assert!(Settings::from_tokens(&tokens(&["nearest", "truncate"])).is_err());
        assert!(Settings::from_tokens(&tokens(&["44100", "48000"])).is_err());
        assert!(Settings::from_tokens(&tokens(&["fast"])).is_err());
        assert!(Settings::from_tokens(&tokens(&["0"])).is_err());
        assert!(Settings::from_tokens(&tokens(&["24", "48000", "nearest", "x"])).is_err());
    }

    // ===== Report tests =====

    #[test]
    fn test_report_from_timecode_rewrites_separator() {
        let settings = Settings {
            framerate: Framerate::Fps29_97Df,
            ..Settings::default()
        };
        let report = build_report(&TimeInput::Timecode("01:00:00:00".into()), settings).unwrap();
        assert_eq!(report.timecode, "01:00:00;00");
        assert_eq!(report.sample, 172_799_827);
        assert_eq!(report.t_damf, 3600.0);
        assert_eq!(report.frames, 107_892);
    }

    #[test]
    fn test_report_from_samples() {
        let report = build_report(&TimeInput::Sample(48_500), Settings::default()).unwrap();
        assert_eq!(report.input_kind, "sample position");
        assert_eq!(report.timecode, "00:00:01:00");
        assert_eq!(report.subframes, "00:00:01:00.25");
        assert_eq!(report.t_real, 48_500.0 / 48_000.0);
        assert_eq!(report.frames, 24);
    }

    #[test]
    fn test_report_from_damf_seconds() {
        let settings = Settings {
            framerate: Framerate::Fps30Df,
            ..Settings::default()
        };
        let report = build_report(&TimeInput::DamfSeconds(1001.0), settings).unwrap();
        assert!((report.t_real - 1000.0).abs() < 1e-9);
        assert_eq!(report.timecode, "00:16:41;00");
    }

    #[test]
    fn test_report_from_frames() {
        let settings = Settings {
            framerate: Framerate::Fps29_97Df,
            ..Settings::default()
        };
        let report = build_report(&TimeInput::Frames(30598), settings).unwrap();
        assert_eq!(report.timecode, "00:17:01;00");
        assert_eq!(report.sample, 49_005_757);
    }

    #[test]
    fn test_report_invalid_timecode() {
        let settings = Settings {
            framerate: Framerate::Fps29_97Df,
            ..Settings::default()
        };
        assert!(build_report(&TimeInput::Timecode("00:01:00:00".into()), settings).is_err());
    }

    #[test]
    fn test_report_serializes() {
        let report = build_report(&TimeInput::Frames(24), Settings::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["timecode"], "00:00:01:00");
        assert_eq!(json["sample"], 48_000);
        assert_eq!(json["rounding"], "nearest");
    }
}
