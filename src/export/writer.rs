//! WAV clip writing.

use std::fs;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter as HoundWriter};

use crate::Error;
use crate::constants::export::WAV_BITS_PER_SAMPLE;

/// Capability that persists a sample range to a named artifact.
///
/// Injected into the exporter so the output format and location stay out of
/// the export logic; tests substitute a failing writer to exercise
/// per-segment error isolation.
pub trait ClipWriter: Send + Sync {
    /// Write `samples` under `name` and return the artifact path.
    fn write_clip(&self, name: &str, samples: &[f32], sample_rate: u32)
    -> Result<PathBuf, Error>;
}

/// Writes clips as 16-bit PCM mono WAV files into a single directory.
#[derive(Debug, Clone)]
pub struct WavClipWriter {
    /// Output directory for clips.
    output_dir: PathBuf,
}

impl WavClipWriter {
    /// Create a writer targeting `output_dir`. The directory must exist.
    #[must_use]
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }
}

impl ClipWriter for WavClipWriter {
    fn write_clip(
        &self,
        name: &str,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<PathBuf, Error> {
        let path = self.output_dir.join(name);
        if let Err(e) = write_wav_file(&path, samples, sample_rate) {
            // Never leave a torn artifact behind.
            let _ = fs::remove_file(&path);
            return Err(e);
        }
        Ok(path)
    }
}

/// Write samples to a WAV file.
fn write_wav_file(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: WAV_BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut writer = HoundWriter::create(path, spec).map_err(|e| Error::ClipWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    // Convert f32 samples to i16
    for &sample in samples {
        #[allow(clippy::cast_possible_truncation)]
        let sample_i16 = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer
            .write_sample(sample_i16)
            .map_err(|e| Error::ClipWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
    }

    writer.finalize().map_err(|e| Error::ClipWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
