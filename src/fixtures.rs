#[cfg(test)]
pub mod test {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use crate::file::MARKER_FILE;

    /// A throwaway project tree rooted in a temp directory, with an empty
    /// marker file at the root.
    pub struct Project {
        dir: TempDir,
    }

    impl Project {
        pub fn new() -> Self {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join(MARKER_FILE), "").unwrap();
            Self { dir }
        }

        /// A project whose marker file has the given content.
        pub fn with_marker(content: &str) -> Self {
            let project = Self::new();
            fs::write(project.marker(), content).unwrap();
            project
        }

        /// A project directory with no marker file at all.
        pub fn without_marker() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        pub fn root(&self) -> &Path {
            self.dir.path()
        }

        pub fn marker(&self) -> PathBuf {
            self.root().join(MARKER_FILE)
        }

        /// Create the template directory `rel` (and its parents).
        pub fn template(self, rel: &str) -> Self {
            fs::create_dir_all(self.root().join(rel)).unwrap();
            self
        }

        /// Mark `rel` as a branch by writing its sentinel file.
        pub fn branch(self, rel: &str) -> Self {
            let dir = self.root().join(rel);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("build_order.txt"), "").unwrap();
            self
        }

        /// Write `content` to `rel` under the root.
        pub fn file(self, rel: &str, content: &str) -> Self {
            let path = self.root().join(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
            self
        }
    }

    #[test]
    fn project_has_marker() {
        let project = Project::new().template("network/vpc");
        assert!(project.marker().is_file());
        assert!(project.root().join("network/vpc").is_dir());
    }
}
