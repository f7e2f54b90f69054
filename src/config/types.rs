//! Configuration type definitions.

use crate::constants::{
    DEFAULT_ENERGY_THRESHOLD, DEFAULT_FRAME_LENGTH, DEFAULT_HOP_LENGTH,
    DEFAULT_MIN_SILENCE_DURATION, DEFAULT_MIN_SPEECH_DURATION, DEFAULT_SAMPLE_RATE,
    export::DEFAULT_CLIP_PREFIX,
};
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Boundary detection settings.
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Audio normalization settings.
    #[serde(default)]
    pub audio: AudioConfig,

    /// Clip export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Boundary detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Analysis frame length in samples.
    pub frame_length: usize,

    /// Hop between consecutive frames in samples.
    pub hop_length: usize,

    /// Normalized energy threshold for speech classification.
    pub threshold: f32,

    /// Minimum speech segment duration in seconds.
    pub min_speech_duration: f64,

    /// Minimum silence duration in seconds, used when `merge_gaps` is set.
    pub min_silence_duration: f64,

    /// Merge speech runs separated by less than `min_silence_duration`.
    pub merge_gaps: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            frame_length: DEFAULT_FRAME_LENGTH,
            hop_length: DEFAULT_HOP_LENGTH,
            threshold: DEFAULT_ENERGY_THRESHOLD,
            min_speech_duration: DEFAULT_MIN_SPEECH_DURATION,
            min_silence_duration: DEFAULT_MIN_SILENCE_DURATION,
            merge_gaps: false,
        }
    }
}

/// Audio normalization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Analysis sample rate in Hz; decoded audio is resampled to this.
    pub sample_rate: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Clip export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Prefix for exported clip filenames.
    pub clip_prefix: String,

    /// Replace existing clips in the output directory without asking.
    pub overwrite: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            clip_prefix: DEFAULT_CLIP_PREFIX.to_string(),
            overwrite: false,
        }
    }
}
