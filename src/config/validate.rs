//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_detection(config)?;
    validate_audio(config)?;
    Ok(())
}

/// Validate boundary detection settings.
fn validate_detection(config: &Config) -> Result<()> {
    let detection = &config.detection;

    if detection.frame_length == 0 {
        return Err(Error::ConfigValidation {
            message: "detection.frame_length must be at least 1".to_string(),
        });
    }

    if detection.hop_length == 0 {
        return Err(Error::ConfigValidation {
            message: "detection.hop_length must be at least 1".to_string(),
        });
    }

    if !(0.0..=1.0).contains(&detection.threshold) {
        return Err(Error::ConfigValidation {
            message: format!(
                "detection.threshold must be between 0.0 and 1.0, got {}",
                detection.threshold
            ),
        });
    }

    if detection.min_speech_duration < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "detection.min_speech_duration must be non-negative, got {}",
                detection.min_speech_duration
            ),
        });
    }

    if detection.min_silence_duration < 0.0 {
        return Err(Error::ConfigValidation {
            message: format!(
                "detection.min_silence_duration must be non-negative, got {}",
                detection.min_silence_duration
            ),
        });
    }

    Ok(())
}

/// Validate audio normalization settings.
fn validate_audio(config: &Config) -> Result<()> {
    if config.audio.sample_rate == 0 {
        return Err(Error::ConfigValidation {
            message: "audio.sample_rate must be greater than zero".to_string(),
        });
    }

    Ok(())
}
