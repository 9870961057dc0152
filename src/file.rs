//! Marker file discovery and loading.
//!
//! The project root is the nearest directory, walking up from a template, that
//! contains the marker file (`.colonize.yaml` unless the loader says
//! otherwise). Only regular files count: a directory with the marker's name is
//! skipped.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::ColonizeError;

/// Default marker file name.
pub const MARKER_FILE: &str = ".colonize.yaml";

/// Walk from `start` toward the filesystem root and return the path of the
/// first `{dir}/{marker}` found (deepest wins).
pub fn find_marker(start: &Path, marker: &str) -> Result<PathBuf, ColonizeError> {
    for dir in start.ancestors() {
        let candidate = dir.join(marker);
        trace!(candidate = %candidate.display(), "probing for marker");
        if candidate.is_file() {
            debug!(marker = %candidate.display(), "found project root marker");
            return Ok(candidate);
        }
    }

    Err(ColonizeError::MarkerNotFound {
        start: start.to_path_buf(),
        marker: marker.into(),
    })
}

/// Read the marker file's content.
pub fn read_marker(path: &Path) -> Result<String, ColonizeError> {
    std::fs::read_to_string(path).map_err(|e| ColonizeError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// The project root: the directory containing the marker file.
pub fn root_of(marker_path: &Path) -> PathBuf {
    marker_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
