//! Pipeline coordination: input collection and output directory policy.

use crate::constants::MEDIA_EXTENSIONS;
use crate::constants::export::{OUTPUT_DIR_SUFFIX, SEGMENTS_FILENAME};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Determine the output directory for an input file.
///
/// With an explicit parent directory the per-input directory is nested under
/// it; otherwise it is created beside the input. Either way each input gets
/// its own `<stem>_segments` directory so clip names never collide.
pub fn output_dir_for(input: &Path, explicit_parent: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().map_or_else(
        || std::borrow::Cow::Borrowed("output"),
        |s| s.to_string_lossy(),
    );
    let dir_name = format!("{stem}{OUTPUT_DIR_SUFFIX}");

    explicit_parent.map_or_else(
        || {
            input
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
                .join(&dir_name)
        },
        |parent| parent.join(&dir_name),
    )
}

/// Create the output directory and resolve the overwrite policy.
///
/// Pre-existing clips matching `clip_prefix` are an error unless
/// `overwrite` is set, in which case they are removed before exporting.
/// The policy is resolved entirely here; nothing ever prompts.
pub fn prepare_output_dir(dir: &Path, clip_prefix: &str, overwrite: bool) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| Error::OutputDirCreate {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let existing = existing_clips(dir, clip_prefix)?;
    if existing.is_empty() {
        return Ok(());
    }

    if !overwrite {
        return Err(Error::OutputDirNotEmpty {
            path: dir.to_path_buf(),
        });
    }

    debug!("Removing {} existing clip(s) from {}", existing.len(), dir.display());
    for clip in existing {
        std::fs::remove_file(&clip)?;
    }

    Ok(())
}

/// List clips in `dir` whose names match `<clip_prefix>*.wav`.
fn existing_clips(dir: &Path, clip_prefix: &str) -> Result<Vec<PathBuf>> {
    let mut clips = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_clip = path.file_name().and_then(|n| n.to_str()).is_some_and(|name| {
            name.starts_with(clip_prefix)
                && Path::new(name)
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
        });
        if is_clip && path.is_file() {
            clips.push(path);
        }
    }
    Ok(clips)
}

/// Path of the segment list inside an output directory.
#[must_use]
pub fn segments_path_for(output_dir: &Path) -> PathBuf {
    output_dir.join(SEGMENTS_FILENAME)
}

/// Collect input files from paths (files and directories).
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_media_file(path) {
                files.push(path.clone());
            } else {
                warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            collect_media_files_recursive(path, &mut files)?;
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(files)
}

/// Recursively collect media files from a directory.
fn collect_media_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_media_files_recursive(&path, files)?;
        } else if is_media_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file has a supported media extension.
fn is_media_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension().is_some_and(|ext| {
        MEDIA_EXTENSIONS
            .iter()
            .any(|supported| ext.eq_ignore_ascii_case(OsStr::new(supported)))
    })
}
