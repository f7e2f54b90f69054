//! End-to-end detection scenarios: profile + boundary scan on synthetic signals.

use vadcut::error::Error;
use vadcut::segments::SegmentSet;
use vadcut::vad::{DetectorOptions, compute_profile, detect_segments};

const RATE: u32 = 16_000;
const FRAME: usize = 512;
const HOP: usize = 256;

/// Temporal resolution of the profile in seconds.
const HOP_SECS: f64 = HOP as f64 / RATE as f64;

/// Build a silent signal with loud bursts at the given `(start, end)` times.
fn signal_with_bursts(total_secs: f64, bursts: &[(f64, f64)]) -> Vec<f32> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut samples = vec![0.0f32; (total_secs * f64::from(RATE)) as usize];
    for &(start, end) in bursts {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let from = (start * f64::from(RATE)) as usize;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let to = ((end * f64::from(RATE)) as usize).min(samples.len());
        for s in &mut samples[from..to] {
            *s = 1.0;
        }
    }
    samples
}

fn detect_with_defaults(samples: &[f32]) -> SegmentSet {
    let profile = compute_profile(samples, RATE, FRAME, HOP).expect("profile");
    detect_segments(&profile, &DetectorOptions::default())
}

#[test]
fn silent_signal_reports_degenerate_error_not_a_crash() {
    // Ten seconds of pure digital silence.
    let samples = vec![0.0f32; 160_000];
    let result = compute_profile(&samples, RATE, FRAME, HOP);
    assert!(matches!(result, Err(Error::DegenerateSignal)));
}

#[test]
fn one_second_burst_centered_in_five_seconds() {
    let samples = signal_with_bursts(5.0, &[(2.0, 3.0)]);
    let segments = detect_with_defaults(&samples);

    assert_eq!(segments.len(), 1);
    let segment = segments.get(0).expect("one segment");
    assert!((segment.start - 2.0).abs() <= 2.0 * HOP_SECS, "start {}", segment.start);
    assert!((segment.end - 3.0).abs() <= 2.0 * HOP_SECS, "end {}", segment.end);
    assert!((segment.duration - 1.0).abs() <= 4.0 * HOP_SECS);
}

#[test]
fn two_bursts_with_short_gap_stay_separate_by_default() {
    // 0.4s bursts separated by 0.2s, below the default 0.5s minimum silence.
    let samples = signal_with_bursts(3.0, &[(1.0, 1.4), (1.6, 2.0)]);
    let segments = detect_with_defaults(&samples);
    assert_eq!(segments.len(), 2);
}

#[test]
fn two_bursts_with_short_gap_merge_when_requested() {
    let samples = signal_with_bursts(3.0, &[(1.0, 1.4), (1.6, 2.0)]);
    let profile = compute_profile(&samples, RATE, FRAME, HOP).expect("profile");
    let options = DetectorOptions {
        merge_gaps: true,
        ..DetectorOptions::default()
    };
    let segments = detect_segments(&profile, &options);

    assert_eq!(segments.len(), 1);
    let segment = segments.get(0).expect("merged segment");
    assert!((segment.duration - 1.0).abs() <= 4.0 * HOP_SECS);
}

#[test]
fn burst_shorter_than_minimum_speech_yields_nothing() {
    let samples = signal_with_bursts(3.0, &[(1.0, 1.1)]);
    let segments = detect_with_defaults(&samples);
    assert!(segments.is_empty());
}

#[test]
fn detection_is_pure_and_repeatable() {
    let samples = signal_with_bursts(8.0, &[(1.0, 2.2), (4.0, 4.8), (6.5, 7.4)]);
    let first = detect_with_defaults(&samples);
    let second = detect_with_defaults(&samples);
    assert_eq!(first, second);
}

#[test]
fn all_segments_satisfy_duration_and_ordering_invariants() {
    let samples = signal_with_bursts(8.0, &[(0.5, 1.2), (2.0, 2.35), (3.0, 4.0), (6.0, 7.5)]);
    let segments = detect_with_defaults(&samples);

    let mut previous_end = 0.0f64;
    for segment in &segments {
        assert!(segment.end > segment.start);
        assert!(segment.duration >= 0.3);
        assert!(segment.start >= previous_end);
        previous_end = segment.end;
    }
}
