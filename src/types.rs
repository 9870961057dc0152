use std::path::PathBuf;

/// Everything `load_config` needs, already worked out by the caller.
///
/// [`load_config_in_tree`](crate::load_config_in_tree) builds one of these from
/// a bare template path by searching upward for the marker file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadRequest {
    /// The environment, e.g. `dev`.
    pub environment: String,
    /// Where the command runs (typically the current directory).
    pub origin_path: PathBuf,
    /// Logical name of the template, e.g. `vpc`.
    pub template_name: String,
    /// Template path relative to the root, e.g. `network/vpc`.
    pub template_path: PathBuf,
    /// Path of the marker file.
    pub marker_path: PathBuf,
    /// The project root (directory holding the marker file).
    pub root_path: PathBuf,
}

/// A template path plus environment: the input of
/// [`load_config_in_tree`](crate::load_config_in_tree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRequest {
    pub path: PathBuf,
    pub environment: String,
}
