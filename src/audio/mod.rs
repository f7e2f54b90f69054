//! Media decoding and sample-rate normalization.

mod decode;
mod resample;

pub use decode::{DecodedAudio, decode_media_file};
pub use resample::resample;
