//! Single file processing pipeline.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::audio::{decode_media_file, resample};
use crate::error::Result;
use crate::export::{ClipWriter, ExportResult, WavClipWriter, export_segments};
use crate::output::progress;
use crate::pipeline::{prepare_output_dir, segments_path_for};
use crate::segments::{SegmentSet, load_segments, save_segments};
use crate::vad::{DetectorOptions, compute_profile, detect_segments};

/// Options for processing a single file.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Boundary detection tunables.
    pub detector: DetectorOptions,
    /// Analysis frame length in samples.
    pub frame_length: usize,
    /// Hop between consecutive frames in samples.
    pub hop_length: usize,
    /// Analysis sample rate in Hz.
    pub sample_rate: u32,
    /// Prefix for exported clip filenames.
    pub clip_prefix: String,
    /// Replace existing clips in the output directory.
    pub overwrite: bool,
    /// Stop after writing the segment list.
    pub detect_only: bool,
    /// Whether to show progress bars.
    pub progress_enabled: bool,
}

/// Result of processing a single file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Number of speech segments detected.
    pub segments: usize,
    /// Number of clip exports attempted.
    pub clips_attempted: usize,
    /// Number of clips written successfully.
    pub clips_exported: usize,
    /// Audio duration in seconds.
    pub audio_duration_secs: f32,
    /// Processing duration in seconds.
    pub duration_secs: f64,
}

/// Run the full pipeline on one media file.
///
/// Decode, resample to the analysis rate, profile, detect, persist the
/// segment list, then export clips unless `detect_only` is set.
pub fn process_file(
    input_path: &Path,
    output_dir: &Path,
    options: &ProcessOptions,
) -> Result<ProcessResult> {
    let start_time = Instant::now();

    info!("Processing: {}", input_path.display());

    let decoded = decode_media_file(input_path)?;
    let audio_duration_secs = decoded.duration_secs;
    info!(
        "Decoded {} of audio ({} Hz)",
        progress::format_duration(audio_duration_secs),
        decoded.sample_rate
    );

    let samples = if decoded.sample_rate == options.sample_rate {
        decoded.samples
    } else {
        debug!(
            "Resampling from {} Hz to {} Hz...",
            decoded.sample_rate, options.sample_rate
        );
        resample(decoded.samples, decoded.sample_rate, options.sample_rate)?
    };

    let profile = compute_profile(
        &samples,
        options.sample_rate,
        options.frame_length,
        options.hop_length,
    )?;
    debug!("Energy profile: {} frames", profile.len());

    let segments = detect_segments(&profile, &options.detector);
    info!(
        "Detected {} speech segment(s), {:.2}s total speech",
        segments.len(),
        segments.total_speech()
    );

    if options.detect_only {
        std::fs::create_dir_all(output_dir).map_err(|e| crate::Error::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
    } else {
        prepare_output_dir(output_dir, &options.clip_prefix, options.overwrite)?;
    }

    let segments_path = segments_path_for(output_dir);
    save_segments(&segments_path, &segments)?;
    info!("Segment list written: {}", segments_path.display());

    let (clips_attempted, clips_exported) = if options.detect_only {
        (0, 0)
    } else {
        let result = export_clips(input_path, output_dir, &samples, &segments, options)?;
        (result.attempted(), result.exported())
    };

    let duration_secs = start_time.elapsed().as_secs_f64();
    info!(
        "Finished {} in {:.2}s",
        input_path.display(),
        duration_secs
    );

    Ok(ProcessResult {
        segments: segments.len(),
        clips_attempted,
        clips_exported,
        audio_duration_secs,
        duration_secs,
    })
}

/// Re-export clips from a previously saved segment list.
///
/// The source file is sliced at its native sample rate; timestamps in the
/// list are seconds, so no resampling is involved.
pub fn split_file(
    audio_path: &Path,
    segments_path: &Path,
    output_dir: &Path,
    options: &ProcessOptions,
) -> Result<ProcessResult> {
    let start_time = Instant::now();

    info!("Splitting: {}", audio_path.display());

    // Load before preparing the directory: the list may live inside it.
    let segments = load_segments(segments_path)?;
    info!(
        "Loaded {} segment(s) from {}",
        segments.len(),
        segments_path.display()
    );

    let decoded = decode_media_file(audio_path)?;

    prepare_output_dir(output_dir, &options.clip_prefix, options.overwrite)?;

    let export_options = ProcessOptions {
        sample_rate: decoded.sample_rate,
        ..options.clone()
    };
    let result = export_clips(
        audio_path,
        output_dir,
        &decoded.samples,
        &segments,
        &export_options,
    )?;

    Ok(ProcessResult {
        segments: segments.len(),
        clips_attempted: result.attempted(),
        clips_exported: result.exported(),
        audio_duration_secs: decoded.duration_secs,
        duration_secs: start_time.elapsed().as_secs_f64(),
    })
}

/// Export all segments of one file and report the outcome.
fn export_clips(
    input_path: &Path,
    output_dir: &Path,
    samples: &[f32],
    segments: &SegmentSet,
    options: &ProcessOptions,
) -> Result<ExportResult> {
    let file_name = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("input");

    let pb = progress::create_export_progress(segments.len(), file_name, options.progress_enabled);

    let shared: Arc<[f32]> = samples.into();
    let writer: Arc<dyn ClipWriter> = Arc::new(WavClipWriter::new(output_dir.to_path_buf()));
    let result = export_segments(
        &shared,
        options.sample_rate,
        segments,
        &writer,
        &options.clip_prefix,
    )?;

    progress::finish_progress(pb, "done");

    for outcome in result.outcomes() {
        match &outcome.outcome {
            Ok(path) => debug!(
                "{}: {:.2}s-{:.2}s ({:.2}s)",
                path.display(),
                outcome.segment.start,
                outcome.segment.end,
                outcome.segment.duration
            ),
            Err(e) => warn!("Failed to export segment {}: {e}", outcome.index + 1),
        }
    }

    info!(
        "Exported {}/{} clip(s) to {}",
        result.exported(),
        result.attempted(),
        output_dir.display()
    );

    Ok(result)
}
