//! Clip export from detected segments.

mod exporter;
mod writer;

pub use exporter::{ExportOutcome, ExportResult, clip_name, export_segments};
pub use writer::{ClipWriter, WavClipWriter};
