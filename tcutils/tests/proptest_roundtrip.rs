//! Property-based tests for timecode conversions.
//!
//! Uses proptest to verify that frames, samples, seconds and DAMF-seconds
//! convert back to the timecode they came from, and that frame boundaries
//! behave monotonically.

use proptest::prelude::*;
use tcutils::{
    convert, frame_boundary, Framerate, Frames, RoundingMode, Samplerate, Samples, Seconds,
    Timecode, TimecodeSamples, TimecodeSubframes, WrapMode,
};

fn framerate_strategy() -> impl Strategy<Value = Framerate> {
    prop::sample::select(Framerate::ALL.to_vec())
}

fn samplerate_strategy() -> impl Strategy<Value = Samplerate> {
    prop::sample::select(vec![
        Samplerate::HZ_44100,
        Samplerate::HZ_48000,
        Samplerate::HZ_96000,
        Samplerate::HZ_192000,
    ])
}

/// A frame index inside the 24 hour day of `framerate`.
fn frame_in_day(framerate: Framerate) -> impl Strategy<Value = i32> {
    let day = Timecode::new_with_wrap_mode(framerate, 24, 0, 0, 0, WrapMode::Continue)
        .unwrap()
        .to_frames()
        .unwrap()
        .value();
    0..day
}

fn timecode_strategy() -> impl Strategy<Value = Timecode> {
    framerate_strategy().prop_flat_map(|framerate| {
        frame_in_day(framerate).prop_map(move |frame| {
            Timecode::from_frames(framerate, Frames(frame), WrapMode::default()).unwrap()
        })
    })
}

// =============================================================================
// Timecode Round-Trip Tests
// =============================================================================

proptest! {
    /// Test that a timecode survives a trip through its real frame count.
    #[test]
    fn roundtrip_frames(tc in timecode_strategy()) {
        let frames = tc.to_frames().unwrap();
        let back = Timecode::from_frames(tc.framerate(), frames, WrapMode::default()).unwrap();
        prop_assert_eq!(back, tc);
    }

    /// Test that a timecode survives a trip through its first sample.
    #[test]
    fn roundtrip_samples(tc in timecode_strategy(), samplerate in samplerate_strategy()) {
        let samples = tc.to_samples(samplerate).unwrap();
        for rounding in [RoundingMode::Nearest, RoundingMode::Truncate] {
            let back = Timecode::from_samples(
                tc.framerate(),
                samples,
                samplerate,
                rounding,
                WrapMode::default(),
            )
            .unwrap();
            prop_assert_eq!(back, tc);
        }
    }

    /// Test that a timecode survives a trip through real seconds.
    #[test]
    fn roundtrip_seconds(tc in timecode_strategy()) {
        let seconds = tc.to_seconds().unwrap();
        for rounding in [RoundingMode::Nearest, RoundingMode::Truncate] {
            let back =
                Timecode::from_seconds(tc.framerate(), seconds, rounding, WrapMode::default()).unwrap();
            prop_assert_eq!(back, tc);
        }
    }

    /// Test that a timecode survives a trip through DAMF-seconds.
    #[test]
    fn roundtrip_damf_seconds(tc in timecode_strategy()) {
        let damf = tc.to_damf_seconds().unwrap();
        for rounding in [RoundingMode::Nearest, RoundingMode::Truncate] {
            let back =
                Timecode::from_damf_seconds(tc.framerate(), damf, rounding, WrapMode::default()).unwrap();
            prop_assert_eq!(back, tc);
        }
    }

    /// Test that rendering and parsing give back the same timecode.
    #[test]
    fn roundtrip_text(tc in timecode_strategy()) {
        let text = tc.to_string();
        let back = Timecode::parse(tc.framerate(), &text).unwrap();
        prop_assert_eq!(back, tc);
    }

    /// Test that stepping forward then back is the identity.
    #[test]
    fn next_then_previous(tc in timecode_strategy()) {
        prop_assert_eq!(tc.next().previous(), tc);
        prop_assert_eq!(tc.previous().next(), tc);
    }
}

// =============================================================================
// Scalar Conversion Tests
// =============================================================================

proptest! {
    /// Test that DAMF-seconds map back onto the sample they came from.
    #[test]
    fn roundtrip_samples_damf(
        framerate in framerate_strategy(),
        position in 0i64..4_147_200_000,
    ) {
        let samplerate = Samplerate::HZ_48000;
        let damf = convert::samples_to_damf_seconds(framerate, Samples(position), samplerate);
        let back = convert::damf_seconds_to_samples(framerate, damf, samplerate);
        prop_assert_eq!(back, Samples(position));
    }

    /// Test that real seconds and DAMF-seconds convert back within a microsecond.
    #[test]
    fn roundtrip_seconds_damf(framerate in framerate_strategy(), seconds in 0.0f64..86_000.0) {
        let damf = convert::seconds_to_damf_seconds(framerate, Seconds(seconds));
        let back = convert::damf_seconds_to_seconds(framerate, damf);
        prop_assert!((back.value() - seconds).abs() < 1e-6);
    }
}

// =============================================================================
// Frame Boundary Tests
// =============================================================================

proptest! {
    /// Test that floor and ceiling bracket the position and land on boundaries.
    #[test]
    fn boundary_brackets_position(
        framerate in framerate_strategy(),
        samplerate in samplerate_strategy(),
        position in 0i64..1_000_000_000,
    ) {
        let samples = Samples(position);
        let floor = frame_boundary::floor(framerate, samples, samplerate);
        let ceiling = frame_boundary::ceiling(framerate, samples, samplerate);
        let round = frame_boundary::round(framerate, samples, samplerate);

        prop_assert!(floor <= samples);
        prop_assert!(samples <= ceiling);
        prop_assert!(round == floor || round == ceiling);
        prop_assert!(frame_boundary::is_on_boundary(framerate, floor, samplerate));
        prop_assert!(frame_boundary::is_on_boundary(framerate, ceiling, samplerate));
    }

    /// Test that floor never decreases as the position grows.
    #[test]
    fn boundary_floor_monotonic(
        framerate in framerate_strategy(),
        position in 0i64..1_000_000_000,
        step in 1i64..10_000,
    ) {
        let samplerate = Samplerate::HZ_48000;
        let lower = frame_boundary::floor(framerate, Samples(position), samplerate);
        let upper = frame_boundary::floor(framerate, Samples(position + step), samplerate);
        prop_assert!(lower <= upper);
    }

    /// Test that the sample remainder stays inside the frame.
    #[test]
    fn timecode_samples_remainder_in_frame(
        framerate in framerate_strategy(),
        samplerate in samplerate_strategy(),
        position in 0i64..1_000_000_000,
    ) {
        let tcs = TimecodeSamples::new(framerate, Samples(position), samplerate).unwrap();
        let start = tcs.timecode().to_samples(samplerate).unwrap();
        prop_assert_eq!(start.value() + tcs.remainder().value(), position);
    }

    /// Test that subframe numerators stay below the denominator.
    #[test]
    fn subframes_in_range(
        framerate in framerate_strategy(),
        samplerate in samplerate_strategy(),
        position in 0i64..1_000_000_000,
        denominator in 2u32..1000,
    ) {
        let subframes =
            TimecodeSubframes::from_samples(framerate, Samples(position), samplerate, denominator)
                .unwrap();
        prop_assert!(subframes.numerator() < denominator);
    }
}
