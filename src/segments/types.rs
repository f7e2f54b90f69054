//! Segment type definitions.

use serde::{Deserialize, Serialize};

/// A maximal contiguous speech interval.
///
/// Timestamps are seconds from the start of the signal, rounded to two
/// decimal places. Invariant: `end > start` and `duration = end - start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl Segment {
    /// Build a segment from unrounded boundary timestamps.
    ///
    /// All three fields are rounded to the fixed output precision.
    #[must_use]
    pub fn from_bounds(start: f64, end: f64) -> Self {
        Self {
            start: round_time(start),
            end: round_time(end),
            duration: round_time(end - start),
        }
    }
}

/// An ordered sequence of non-overlapping segments.
///
/// Ordering and non-overlap are guaranteed by construction: the detector
/// appends segments in ascending start order and never emits overlapping
/// runs. Serializes as a plain JSON array of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentSet(Vec<Segment>);

impl SegmentSet {
    /// Create an empty segment set.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set contains no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a segment.
    ///
    /// Callers must append in ascending, non-overlapping start order.
    pub fn push(&mut self, segment: Segment) {
        debug_assert!(
            self.0.last().is_none_or(|prev| segment.start >= prev.end),
            "segments must be appended in ascending non-overlapping order"
        );
        self.0.push(segment);
    }

    /// Iterate over segments in start order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.0.iter()
    }

    /// Segment at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.0.get(index)
    }

    /// Sum of all segment durations in seconds.
    #[must_use]
    pub fn total_speech(&self) -> f64 {
        self.0.iter().map(|s| s.duration).sum()
    }
}

impl<'a> IntoIterator for &'a SegmentSet {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Segment> for SegmentSet {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Round a timestamp to the fixed output precision.
fn round_time(seconds: f64) -> f64 {
    let scale = 10f64.powi(crate::constants::TIME_DECIMAL_PLACES);
    (seconds * scale).round() / scale
}
