//! Segment export with per-segment failure isolation.
//!
//! Each segment maps to an independent slice of the immutable signal and a
//! distinct artifact, so exports fan out as blocking tasks on a tokio
//! runtime. Results are reassembled in original segment order; one failed
//! clip never aborts the batch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::constants::export::CLIP_INDEX_WIDTH;
use crate::error::{Error, Result};
use crate::export::ClipWriter;
use crate::segments::{Segment, SegmentSet};

/// Outcome of one attempted segment export.
#[derive(Debug)]
pub struct ExportOutcome {
    /// Zero-based index of the segment in the set.
    pub index: usize,
    /// The segment that was attempted.
    pub segment: Segment,
    /// Clamped half-open sample range `[start, end)` that was sliced.
    pub sample_range: (usize, usize),
    /// Written artifact path, or the isolated failure.
    pub outcome: std::result::Result<PathBuf, Error>,
}

/// Aggregated result of an export batch, in original segment order.
#[derive(Debug, Default)]
pub struct ExportResult {
    outcomes: Vec<ExportOutcome>,
}

impl ExportResult {
    /// Number of segments attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of clips written successfully.
    #[must_use]
    pub fn exported(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_ok()).count()
    }

    /// Paths of produced artifacts, in segment order.
    pub fn artifacts(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter_map(|o| o.outcome.as_deref().ok())
    }

    /// Failed exports as `(segment_index, error)` pairs, in segment order.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.outcome.as_ref().err().map(|e| (o.index, e)))
    }

    /// All per-segment outcomes, in segment order.
    #[must_use]
    pub fn outcomes(&self) -> &[ExportOutcome] {
        &self.outcomes
    }
}

/// Generate the deterministic clip filename for a 1-based ordinal.
#[must_use]
pub fn clip_name(prefix: &str, ordinal: usize) -> String {
    format!("{prefix}{ordinal:0width$}.wav", width = CLIP_INDEX_WIDTH)
}

/// Export every segment of `segments` as an independent clip.
///
/// Segments are processed concurrently; the returned [`ExportResult`] is in
/// original segment order regardless of completion order. Per-clip write
/// failures are recorded, not propagated.
///
/// # Errors
///
/// Fails only if the export runtime cannot be created or a worker panics;
/// individual clip failures are reported inside the result.
pub fn export_segments(
    samples: &Arc<[f32]>,
    sample_rate: u32,
    segments: &SegmentSet,
    writer: &Arc<dyn ClipWriter>,
    clip_prefix: &str,
) -> Result<ExportResult> {
    if segments.is_empty() {
        return Ok(ExportResult::default());
    }

    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("failed to create export runtime: {e}"),
    })?;

    let outcomes = runtime.block_on(async {
        let mut handles = Vec::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            let samples = Arc::clone(samples);
            let writer = Arc::clone(writer);
            let name = clip_name(clip_prefix, index + 1);
            let segment = *segment;
            handles.push(tokio::task::spawn_blocking(move || {
                export_one(&samples, sample_rate, index, segment, writer.as_ref(), &name)
            }));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (index, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => outcomes.push(ExportOutcome {
                    index,
                    segment: segments.get(index).copied().unwrap_or(Segment {
                        start: 0.0,
                        end: 0.0,
                        duration: 0.0,
                    }),
                    sample_range: (0, 0),
                    outcome: Err(Error::Internal {
                        message: format!("export worker failed: {e}"),
                    }),
                }),
            }
        }
        outcomes
    });

    Ok(ExportResult { outcomes })
}

/// Slice and write a single segment.
fn export_one(
    samples: &[f32],
    sample_rate: u32,
    index: usize,
    segment: Segment,
    writer: &dyn ClipWriter,
    name: &str,
) -> ExportOutcome {
    let start_sample = clamp_sample_index(segment.start, sample_rate, samples.len());
    let end_sample = clamp_sample_index(segment.end, sample_rate, samples.len());

    // An empty slice still counts as an attempt; the writer decides whether
    // a zero-length artifact is acceptable.
    let slice = if end_sample > start_sample {
        &samples[start_sample..end_sample]
    } else {
        &[][..]
    };

    debug!(
        "exporting {name}: {:.2}s-{:.2}s -> samples {start_sample}..{end_sample}",
        segment.start, segment.end
    );

    ExportOutcome {
        index,
        segment,
        sample_range: (start_sample, end_sample),
        outcome: writer.write_clip(name, slice, sample_rate),
    }
}

/// Convert a timestamp to a sample index clamped into `[0, len]`.
///
/// Out-of-range timestamps clamp rather than fail: a segment reaching past
/// the end of the signal exports whatever overlap exists.
fn clamp_sample_index(seconds: f64, sample_rate: u32, len: usize) -> usize {
    let sample = (seconds * f64::from(sample_rate)).round();
    if sample <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let sample = sample as usize;
    sample.min(len)
}
