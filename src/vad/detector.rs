//! Speech boundary detection over an energy profile.
//!
//! A two-state machine walks the frame-level speech mask: entering speech
//! records a candidate start, leaving speech closes the candidate and
//! applies the minimum-duration filter. A frame counts as speech when its
//! normalized energy is strictly greater than the threshold.

use crate::segments::{Segment, SegmentSet};
use crate::vad::EnergyProfile;

/// Tunables for boundary detection.
#[derive(Debug, Clone, Copy)]
pub struct DetectorOptions {
    /// Normalized energy threshold; energy equal to the threshold is silence.
    pub threshold: f32,
    /// Candidates shorter than this many seconds are discarded.
    pub min_speech_duration: f64,
    /// Silence runs shorter than this are bridged when `merge_gaps` is set.
    pub min_silence_duration: f64,
    /// Merge speech runs separated by less than `min_silence_duration`.
    ///
    /// Off by default: each contiguous run above threshold is emitted
    /// independently, regardless of how close it is to its neighbors.
    pub merge_gaps: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            threshold: crate::constants::DEFAULT_ENERGY_THRESHOLD,
            min_speech_duration: crate::constants::DEFAULT_MIN_SPEECH_DURATION,
            min_silence_duration: crate::constants::DEFAULT_MIN_SILENCE_DURATION,
            merge_gaps: false,
        }
    }
}

/// A contiguous run of above-threshold frames, in unrounded seconds.
#[derive(Debug, Clone, Copy)]
struct SpeechRun {
    start: f64,
    end: f64,
}

/// Detect speech segments in an energy profile.
///
/// Returns segments ordered by start time and mutually non-overlapping.
/// An empty profile yields an empty set. The detection itself cannot fail;
/// degenerate input is rejected upstream by the profiler.
#[must_use]
pub fn detect_segments(profile: &EnergyProfile, options: &DetectorOptions) -> SegmentSet {
    let mut runs = Vec::new();
    let mut current: Option<f64> = None;

    for (index, energy) in profile.iter() {
        let is_speech = energy > options.threshold;
        match (is_speech, current) {
            (true, None) => current = Some(profile.frame_time(index)),
            (false, Some(start)) => {
                runs.push(SpeechRun {
                    start,
                    end: profile.frame_time(index),
                });
                current = None;
            }
            _ => {}
        }
    }

    // Signal ended while still in speech: close at the last frame.
    if let Some(start) = current
        && !profile.is_empty()
    {
        runs.push(SpeechRun {
            start,
            end: profile.frame_time(profile.len() - 1),
        });
    }

    if options.merge_gaps {
        runs = merge_short_gaps(runs, options.min_silence_duration);
    }

    runs.into_iter()
        .filter(|run| run.end - run.start >= options.min_speech_duration)
        .map(|run| Segment::from_bounds(run.start, run.end))
        .collect()
}

/// Bridge silence gaps shorter than `min_silence` between adjacent runs.
fn merge_short_gaps(runs: Vec<SpeechRun>, min_silence: f64) -> Vec<SpeechRun> {
    let mut merged: Vec<SpeechRun> = Vec::with_capacity(runs.len());
    for run in runs {
        match merged.last_mut() {
            Some(prev) if run.start - prev.end < min_silence => prev.end = run.end,
            _ => merged.push(run),
        }
    }
    merged
}
