//! Pure path helpers used by the tree resolver. No filesystem access.

use std::path::{Component, Path, PathBuf};

use crate::error::ColonizeError;

/// The normal segments of a relative path. `.` and empty segments vanish.
pub fn segments(rel: &Path) -> Vec<&std::ffi::OsStr> {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s),
            _ => None,
        })
        .collect()
}

/// Cumulative prefixes of a relative path: `a/b` yields `[a, a/b]`.
///
/// An empty path yields no prefixes.
pub fn tree_paths(rel: &Path) -> Vec<PathBuf> {
    let mut prefix = PathBuf::new();
    segments(rel)
        .into_iter()
        .map(|segment| {
            prefix.push(segment);
            prefix.clone()
        })
        .collect()
}

/// Resolve `.` and `..` lexically, without touching the filesystem.
///
/// Symlinks are not followed. A `..` at the filesystem root stays at the root;
/// leading `..` segments of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// The part of `path` beneath `root`, or [`ColonizeError::OutsideRoot`].
pub fn template_rel_path(path: &Path, root: &Path) -> Result<PathBuf, ColonizeError> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|_| ColonizeError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })
}

/// The final segment of `path`, or an empty string for a filesystem root.
pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Join `base` onto the front of every path. An empty path maps to `base` itself.
pub fn prepend_to_paths(paths: &[PathBuf], base: &Path) -> Vec<PathBuf> {
    paths
        .iter()
        .map(|p| {
            if p.as_os_str().is_empty() {
                base.to_path_buf()
            } else {
                base.join(p)
            }
        })
        .collect()
}

/// Join `tail` onto the end of every path.
pub fn append_to_paths(paths: &[PathBuf], tail: &Path) -> Vec<PathBuf> {
    paths.iter().map(|p| p.join(tail)).collect()
}
