//! Audio resampling using rubato.

use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

use crate::error::{Error, Result};

/// Fixed chunk size for the FFT resampler.
const CHUNK_SIZE: usize = 1024;

/// Resample a mono signal to the target sample rate.
///
/// Returns the input unchanged if already at the target rate.
pub fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate {
        return Ok(samples);
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        1,
        1,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let frames_per_chunk = resampler.input_frames_next();
    let ratio = f64::from(to_rate) / f64::from(from_rate);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let estimated = (samples.len() as f64 * ratio).ceil() as usize + CHUNK_SIZE;
    let mut output = Vec::with_capacity(estimated);

    let mut pos = 0;
    while pos + frames_per_chunk <= samples.len() {
        let chunk = &samples[pos..pos + frames_per_chunk];
        output.extend(run_chunk(&mut resampler, chunk, frames_per_chunk)?);
        pos += frames_per_chunk;
    }

    // Pad the tail up to a full chunk, then keep only the frames that
    // correspond to real input.
    let remaining = samples.len() - pos;
    if remaining > 0 {
        let mut tail = samples[pos..].to_vec();
        tail.resize(frames_per_chunk, 0.0);
        let resampled = run_chunk(&mut resampler, &tail, frames_per_chunk)?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let wanted = (remaining as f64 * ratio).ceil() as usize;
        let take = wanted.min(resampled.len());
        output.extend_from_slice(&resampled[..take]);
    }

    Ok(output)
}

/// Run one fixed-size chunk through the resampler.
fn run_chunk(resampler: &mut Fft<f32>, chunk: &[f32], frames: usize) -> Result<Vec<f32>> {
    let adapter = SequentialSlice::new(chunk, 1, frames).map_err(|e| Error::Resample {
        reason: format!("failed to wrap input chunk: {e}"),
    })?;

    let resampled = resampler
        .process(&adapter, 0, None)
        .map_err(|e| Error::Resample {
            reason: e.to_string(),
        })?;

    Ok(resampled.take_data())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_same_rate_is_passthrough() {
        let samples = vec![0.1, 0.2, 0.3, 0.4];
        let result = resample(samples.clone(), 16_000, 16_000).unwrap();
        assert_eq!(result, samples);
    }

    #[test]
    fn test_downsample_to_analysis_rate() {
        #[allow(clippy::cast_precision_loss)]
        let samples: Vec<f32> = (0..48_000).map(|i| (i as f32 * 0.001).sin()).collect();
        let output = resample(samples, 48_000, 16_000).unwrap();
        // Roughly a third of the input length.
        assert!(output.len() > 14_000);
        assert!(output.len() < 18_000);
    }

    #[test]
    fn test_upsample() {
        #[allow(clippy::cast_precision_loss)]
        let samples: Vec<f32> = (0..8_000).map(|i| (i as f32 * 0.001).sin()).collect();
        let output = resample(samples, 8_000, 16_000).unwrap();
        assert!(output.len() > 14_000);
        assert!(output.len() < 18_000);
    }
}
