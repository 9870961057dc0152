//! Naming conventions for a colonize project.
//!
//! [`Schema`] is the single source of truth for every file and directory name
//! the resolver derives. Compiled defaults live in the `#[config(default)]`
//! attributes; a project overrides any subset of them in its marker file (see
//! [`resolve`](crate::resolve)). Keys not mentioned by the project keep their
//! default, so an empty marker file still resolves the whole tree.
//!
//! [`Schema::entries`] is the explicit key table. Lookup, rendering and
//! tests go through it rather than through reflection on the struct.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::ColonizeError;

/// Header written in front of every scaffolded marker file.
pub const MARKER_HEADER: &str = "## Generated by Colonize init\n---\n";

/// File and directory naming conventions, after project overrides.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Directory inside every template holding its per-environment files.
    #[config(default = "env")]
    pub environments_dir: String,

    /// Name of the environment shared by every other environment.
    #[config(default = "default")]
    pub base_environment_ext: String,

    /// Comment placed at the top of generated files.
    #[config(default = "This file generated by colonize")]
    pub autogenerate_comment: String,

    /// Combined variable values, written beside the invoking template.
    #[config(default = "_combined.tfvars")]
    pub combined_vals_file: String,

    /// Combined variable declarations, written beside the invoking template.
    #[config(default = "_combined_variables.tf")]
    pub combined_vars_file: String,

    /// Combined derived values, written beside the invoking template.
    #[config(default = "_combined_derived.tfvars")]
    pub combined_derived_vals_file: String,

    /// Combined derived declarations, written beside the invoking template.
    #[config(default = "_combined_derived.tf")]
    pub combined_derived_vars_file: String,

    /// Combined infrastructure definitions, written beside the invoking template.
    #[config(default = "_combined.tf")]
    pub combined_tf_file: String,

    /// Generated remote-state setup script, written beside the invoking template.
    #[config(default = "_remote_setup.sh")]
    pub combined_remote_config_file: String,

    /// Remote-state bootstrap script under the root's environments directory.
    #[config(default = "remote_setup.sh")]
    pub remote_config_file: String,

    /// Derived values file inside each environments directory.
    #[config(default = "derived.tfvars")]
    pub derived_file: String,

    /// Suffix appended to the environment name to form its values file.
    #[config(default = ".tfvars")]
    pub vals_file_env_post_string: String,

    /// Sentinel file marking a branch and listing its children in order.
    #[config(default = "build_order.txt")]
    pub branch_order_file: String,
}

impl Schema {
    /// Every convention at its compiled default.
    pub fn defaults() -> Result<Self, ColonizeError> {
        Ok(Self::builder().load()?)
    }

    /// The key table: `(textual key, current value)` in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 13] {
        [
            ("environments_dir", self.environments_dir.as_str()),
            ("base_environment_ext", self.base_environment_ext.as_str()),
            ("autogenerate_comment", self.autogenerate_comment.as_str()),
            ("combined_vals_file", self.combined_vals_file.as_str()),
            ("combined_vars_file", self.combined_vars_file.as_str()),
            ("combined_derived_vals_file", self.combined_derived_vals_file.as_str()),
            ("combined_derived_vars_file", self.combined_derived_vars_file.as_str()),
            ("combined_tf_file", self.combined_tf_file.as_str()),
            ("combined_remote_config_file", self.combined_remote_config_file.as_str()),
            ("remote_config_file", self.remote_config_file.as_str()),
            ("derived_file", self.derived_file.as_str()),
            ("vals_file_env_post_string", self.vals_file_env_post_string.as_str()),
            ("branch_order_file", self.branch_order_file.as_str()),
        ]
    }

    /// Look up a single convention by its textual key.
    pub fn get(&self, key: &str) -> Result<&str, ColonizeError> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
            .ok_or_else(|| ColonizeError::KeyNotFound(key.into()))
    }

    /// Render as a marker file: the fixed header followed by every key.
    pub fn render(&self) -> Result<String, ColonizeError> {
        let body = serde_yaml::to_string(self).map_err(ColonizeError::RenderError)?;
        Ok(format!("{MARKER_HEADER}{body}"))
    }

    /// Write the marker rendering (header, then every key) to `w`.
    pub fn to_yaml<W: Write>(&self, mut w: W) -> Result<(), ColonizeError> {
        w.write_all(MARKER_HEADER.as_bytes())
            .map_err(ColonizeError::WriteError)?;
        serde_yaml::to_writer(&mut w, self).map_err(ColonizeError::RenderError)?;
        w.flush().map_err(ColonizeError::WriteError)
    }

    /// Scaffold a marker file at `path`, replacing any existing file.
    /// Creates parent directories if needed.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ColonizeError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ColonizeError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file = File::create(path).map_err(|e| ColonizeError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.to_yaml(file).map_err(|e| match e {
            ColonizeError::WriteError(source) => ColonizeError::IoError {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Commented YAML template built from the field docs and defaults.
    pub fn template() -> String {
        confique::yaml::template::<Self>(confique::yaml::FormatOptions::default())
    }
}
