//! Media decoding using symphonia.
//!
//! Probes any supported container, including video files carrying an audio
//! track, decodes the first audio track, and mixes it down to mono f32.

use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::warn;

/// Decoded mono audio stream.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Audio samples as mono f32 in range [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Duration in seconds.
    pub duration_secs: f32,
}

/// Decode the audio track of a media file to mono f32 samples.
///
/// Video containers are handled the same as plain audio files: only the
/// first audio track is decoded.
pub fn decode_media_file(path: &Path) -> Result<DecodedAudio> {
    let file = File::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let stream = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::AudioDecode {
            path: path.to_path_buf(),
            source: "missing sample rate".into(),
        })?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => downmix_into_mono(&decoded, &mut samples),
            // Corrupt packets are recoverable; keep decoding.
            Err(symphonia::core::errors::Error::DecodeError(reason)) => {
                warn!("skipping undecodable packet in {}: {reason}", path.display());
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        }
    }

    if samples.is_empty() {
        return Err(Error::NoAudioSamples {
            path: path.to_path_buf(),
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let duration_secs = samples.len() as f32 / sample_rate as f32;

    Ok(DecodedAudio {
        samples,
        sample_rate,
        duration_secs,
    })
}

/// Append a decoded buffer to the output, averaging channels to mono.
fn downmix_into_mono(buffer: &AudioBufferRef, output: &mut Vec<f32>) {
    match buffer {
        AudioBufferRef::F32(buf) => {
            let channels = buf.spec().channels.count();
            mix_frames(buf.frames(), channels, |ch, i| buf.chan(ch)[i], output);
        }
        AudioBufferRef::S16(buf) => {
            const NORM: f32 = 32_768.0;
            let channels = buf.spec().channels.count();
            mix_frames(
                buf.frames(),
                channels,
                |ch, i| f32::from(buf.chan(ch)[i]) / NORM,
                output,
            );
        }
        AudioBufferRef::S32(buf) => {
            const NORM: f32 = 2_147_483_648.0;
            let channels = buf.spec().channels.count();
            #[allow(clippy::cast_precision_loss)]
            mix_frames(
                buf.frames(),
                channels,
                |ch, i| buf.chan(ch)[i] as f32 / NORM,
                output,
            );
        }
        _ => {
            // Unsupported sample format, skip
        }
    }
}

/// Average `channels` interleaved planes into mono and append to `output`.
fn mix_frames<F>(frames: usize, channels: usize, sample_at: F, output: &mut Vec<f32>)
where
    F: Fn(usize, usize) -> f32,
{
    output.reserve(frames);
    if channels <= 1 {
        for i in 0..frames {
            output.push(sample_at(0, i));
        }
    } else {
        #[allow(clippy::cast_precision_loss)]
        let scale = 1.0 / channels as f32;
        for i in 0..frames {
            let sum: f32 = (0..channels).map(|ch| sample_at(ch, i)).sum();
            output.push(sum * scale);
        }
    }
}
