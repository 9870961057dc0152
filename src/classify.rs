//! Branch/leaf classification.
//!
//! A node is a branch iff its sentinel file (`build_order.txt` by default)
//! exists directly inside it. Subdirectories alone never make a branch, so
//! directories holding shared resources stay leaves unless they opt in.

use std::path::Path;

use tracing::trace;

use crate::error::ColonizeError;

/// Whether a node aggregates children or is a deployable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Branch,
    Leaf,
}

impl NodeKind {
    pub fn is_branch(self) -> bool {
        self == NodeKind::Branch
    }

    pub fn is_leaf(self) -> bool {
        self == NodeKind::Leaf
    }
}

/// Classify the node at `dir` by probing for `{dir}/{sentinel}`.
///
/// A missing sentinel means [`NodeKind::Leaf`]. Any other failure to stat it is
/// returned as [`ColonizeError::IoError`] rather than guessed at.
pub fn classify(dir: &Path, sentinel: &str) -> Result<NodeKind, ColonizeError> {
    let sentinel_path = dir.join(sentinel);
    let exists = sentinel_path
        .try_exists()
        .map_err(|e| ColonizeError::IoError {
            path: sentinel_path.clone(),
            source: e,
        })?;

    let kind = if exists {
        NodeKind::Branch
    } else {
        NodeKind::Leaf
    };
    trace!(node = %dir.display(), ?kind, "classified node");
    Ok(kind)
}

/// Boolean form of [`classify`]: indeterminate nodes count as "not a branch".
pub fn is_branch_dir(dir: &Path, sentinel: &str) -> bool {
    classify(dir, sentinel).is_ok_and(NodeKind::is_branch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SENTINEL: &str = "build_order.txt";

    #[test]
    fn sentinel_present_is_branch() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SENTINEL), "vpc\nsubnets\n").unwrap();
        assert_eq!(classify(dir.path(), SENTINEL).unwrap(), NodeKind::Branch);
        assert!(is_branch_dir(dir.path(), SENTINEL));
    }

    #[test]
    fn sentinel_absent_is_leaf() {
        let dir = TempDir::new().unwrap();
        assert_eq!(classify(dir.path(), SENTINEL).unwrap(), NodeKind::Leaf);
        assert!(!is_branch_dir(dir.path(), SENTINEL));
    }

    #[test]
    fn empty_sentinel_still_branch() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SENTINEL), "").unwrap();
        assert!(is_branch_dir(dir.path(), SENTINEL));
    }

    #[test]
    fn subdirectories_alone_are_not_a_branch() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("shared").join("modules")).unwrap();
        assert!(!is_branch_dir(dir.path(), SENTINEL));
    }

    #[test]
    fn sentinel_in_child_does_not_count() {
        let dir = TempDir::new().unwrap();
        let child = dir.path().join("vpc");
        fs::create_dir(&child).unwrap();
        fs::write(child.join(SENTINEL), "").unwrap();
        assert!(!is_branch_dir(dir.path(), SENTINEL));
        assert!(is_branch_dir(&child, SENTINEL));
    }

    #[test]
    fn create_then_delete_flips() {
        let dir = TempDir::new().unwrap();
        let sentinel = dir.path().join(SENTINEL);

        assert!(!is_branch_dir(dir.path(), SENTINEL));
        fs::write(&sentinel, "").unwrap();
        assert!(is_branch_dir(dir.path(), SENTINEL));
        fs::remove_file(&sentinel).unwrap();
        assert!(!is_branch_dir(dir.path(), SENTINEL));
    }

    #[test]
    fn custom_sentinel_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SENTINEL), "").unwrap();
        assert!(!is_branch_dir(dir.path(), "order.lst"));
        fs::write(dir.path().join("order.lst"), "").unwrap();
        assert!(is_branch_dir(dir.path(), "order.lst"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_parent_is_indeterminate() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join(SENTINEL), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = classify(&locked, SENTINEL);
        let boolean = is_branch_dir(&locked, SENTINEL);

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Privileged users can stat through a 000 directory.
        if let Err(err) = result {
            assert!(matches!(err, ColonizeError::IoError { .. }));
            assert!(!boolean);
        }
    }
}
