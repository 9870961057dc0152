//! Ancestor-chain derivation.
//!
//! A template at `network/vpc` under root `/proj` has the chain
//!
//! ```text
//! /proj                 (root, the empty relative prefix)
//! /proj/network
//! /proj/network/vpc     (the template itself)
//! ```
//!
//! Every per-node projection (values file, layer directory, derived file) is a
//! parallel array indexed by depth, so index 0 is always the root and the last
//! index is always the template. Callers zip them and concatenate file by file
//! in that order, letting deeper nodes override shallower ones.
//!
//! Combined artifacts are anchored at the origin (where the command runs),
//! never at the root.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::paths;
use crate::schema::Schema;

/// Per-node values file, relative to a node: `{environments_dir}/{env}{suffix}`.
pub fn env_val_path(schema: &Schema, environment: &str) -> PathBuf {
    Path::new(&schema.environments_dir).join(format!(
        "{environment}{}",
        schema.vals_file_env_post_string
    ))
}

/// Per-node layer directory, relative to a node: `{environments_dir}`.
pub fn env_tf_path(schema: &Schema) -> PathBuf {
    PathBuf::from(&schema.environments_dir)
}

/// Per-node derived file, relative to a node: `{environments_dir}/{derived_file}`.
pub fn env_derived_path(schema: &Schema) -> PathBuf {
    Path::new(&schema.environments_dir).join(&schema.derived_file)
}

/// Single-file outputs written beside the invoking template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedPaths {
    pub vals: PathBuf,
    pub vars: PathBuf,
    pub tf: PathBuf,
    pub derived_vals: PathBuf,
    pub derived_vars: PathBuf,
    pub remote: PathBuf,
}

impl CombinedPaths {
    fn anchored_at(origin: &Path, schema: &Schema) -> Self {
        Self {
            vals: origin.join(&schema.combined_vals_file),
            vars: origin.join(&schema.combined_vars_file),
            tf: origin.join(&schema.combined_tf_file),
            derived_vals: origin.join(&schema.combined_derived_vals_file),
            derived_vars: origin.join(&schema.combined_derived_vars_file),
            remote: origin.join(&schema.combined_remote_config_file),
        }
    }
}

/// One node of the chain with its per-environment files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer<'a> {
    pub dir: &'a Path,
    pub values: &'a Path,
    pub tf_dir: &'a Path,
    pub derived: &'a Path,
}

/// The derived, root-to-leaf view of one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    rel_paths: Vec<PathBuf>,
    walkable_paths: Vec<PathBuf>,
    val_paths: Vec<PathBuf>,
    tf_paths: Vec<PathBuf>,
    derived_paths: Vec<PathBuf>,
    combined: CombinedPaths,
    remote_file: PathBuf,
}

impl Tree {
    /// Derive the chain for the template at `template_path` (relative to `root`).
    pub fn derive(
        schema: &Schema,
        environment: &str,
        origin: &Path,
        root: &Path,
        template_path: &Path,
    ) -> Self {
        let rel_paths = paths::tree_paths(template_path);

        // The empty prefix stands for the root itself.
        let mut prefixes = Vec::with_capacity(rel_paths.len() + 1);
        prefixes.push(PathBuf::new());
        prefixes.extend(rel_paths.iter().cloned());
        let walkable_paths = paths::prepend_to_paths(&prefixes, root);

        let val_paths =
            paths::append_to_paths(&walkable_paths, &env_val_path(schema, environment));
        let tf_paths = paths::append_to_paths(&walkable_paths, &env_tf_path(schema));
        let derived_paths = paths::append_to_paths(&walkable_paths, &env_derived_path(schema));

        let remote_file = root
            .join(&schema.environments_dir)
            .join(&schema.remote_config_file);

        trace!(depth = walkable_paths.len(), root = %root.display(), "derived ancestor chain");

        Self {
            rel_paths,
            walkable_paths,
            val_paths,
            tf_paths,
            derived_paths,
            combined: CombinedPaths::anchored_at(origin, schema),
            remote_file,
        }
    }

    /// Cumulative relative prefixes below the root (`[a, a/b]` for `a/b`).
    pub fn rel_paths(&self) -> &[PathBuf] {
        &self.rel_paths
    }

    /// Absolute ancestor directories, root first, template last. Never empty.
    pub fn ancestors(&self) -> &[PathBuf] {
        &self.walkable_paths
    }

    /// Per-node values files, in chain order.
    pub fn value_files(&self) -> &[PathBuf] {
        &self.val_paths
    }

    /// Per-node layer directories holding `.tf` files, in chain order.
    pub fn tf_dirs(&self) -> &[PathBuf] {
        &self.tf_paths
    }

    /// Per-node derived files, in chain order.
    pub fn derived_files(&self) -> &[PathBuf] {
        &self.derived_paths
    }

    pub fn combined(&self) -> &CombinedPaths {
        &self.combined
    }

    /// Remote-state bootstrap script under the root's environments directory.
    pub fn remote_file(&self) -> &Path {
        &self.remote_file
    }

    /// The chain zipped with its per-node files, root first.
    pub fn layers(&self) -> impl ExactSizeIterator<Item = Layer<'_>> + '_ {
        (0..self.walkable_paths.len()).map(move |i| Layer {
            dir: &self.walkable_paths[i],
            values: &self.val_paths[i],
            tf_dir: &self.tf_paths[i],
            derived: &self.derived_paths[i],
        })
    }
}
