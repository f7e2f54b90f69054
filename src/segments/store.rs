//! Segment list persistence.
//!
//! Segments are stored as a JSON array of `{start, end, duration}` records,
//! ordered by start time. The file is the boundary between the detection
//! and export stages and can be edited by hand between runs.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{Error, Result};
use crate::segments::SegmentSet;

/// Load a segment list from a JSON file.
///
/// # Errors
///
/// Fails if the file cannot be read or parsed, or if any record violates
/// the segment invariants (`end > start`, ascending non-overlapping order).
pub fn load_segments(path: &Path) -> Result<SegmentSet> {
    let file = File::open(path).map_err(|e| Error::SegmentsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let segments: SegmentSet =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::SegmentsParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    validate_segments(&segments)?;
    Ok(segments)
}

/// Save a segment list to a JSON file, pretty-printed.
pub fn save_segments(path: &Path, segments: &SegmentSet) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), segments).map_err(|e| {
        Error::SegmentsWrite {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// Check segment invariants on a loaded list.
fn validate_segments(segments: &SegmentSet) -> Result<()> {
    let mut previous_end = f64::NEG_INFINITY;
    for (index, segment) in segments.iter().enumerate() {
        if !segment.start.is_finite() || !segment.end.is_finite() {
            return Err(Error::InvalidSegment {
                index,
                message: "non-finite timestamp".to_string(),
            });
        }
        if segment.end <= segment.start {
            return Err(Error::InvalidSegment {
                index,
                message: format!("end {} is not after start {}", segment.end, segment.start),
            });
        }
        if segment.start < previous_end {
            return Err(Error::InvalidSegment {
                index,
                message: format!(
                    "start {} overlaps previous segment ending at {previous_end}",
                    segment.start
                ),
            });
        }
        previous_end = segment.end;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::segments::Segment;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("segments.json");

        let mut segments = SegmentSet::new();
        segments.push(Segment::from_bounds(1.98, 3.01));
        segments.push(Segment::from_bounds(5.0, 6.25));

        save_segments(&path, &segments).unwrap();
        let loaded = load_segments(&path).unwrap();
        assert_eq!(loaded, segments);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_segments(Path::new("/nonexistent/segments.json"));
        assert!(matches!(result, Err(Error::SegmentsRead { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("segments.json");
        std::fs::write(&path, "not json").unwrap();

        let result = load_segments(&path);
        assert!(matches!(result, Err(Error::SegmentsParse { .. })));
    }

    #[test]
    fn test_load_rejects_inverted_segment() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("segments.json");
        std::fs::write(
            &path,
            r#"[{"start": 3.0, "end": 1.0, "duration": 2.0}]"#,
        )
        .unwrap();

        let result = load_segments(&path);
        assert!(matches!(result, Err(Error::InvalidSegment { index: 0, .. })));
    }

    #[test]
    fn test_load_rejects_overlapping_segments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("segments.json");
        std::fs::write(
            &path,
            r#"[{"start": 1.0, "end": 3.0, "duration": 2.0},
                {"start": 2.0, "end": 4.0, "duration": 2.0}]"#,
        )
        .unwrap();

        let result = load_segments(&path);
        assert!(matches!(result, Err(Error::InvalidSegment { index: 1, .. })));
    }
}
