//! The resolved configuration for one (environment, template) pair.

use std::path::{Path, PathBuf};

use crate::classify::{self, NodeKind};
use crate::error::ColonizeError;
use crate::schema::Schema;
use crate::tree::{self, CombinedPaths, Layer, Tree};
use crate::types::LoadRequest;

/// Caller-supplied identity of a load. Set even when loading fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// Environment name, e.g. `dev`.
    pub environment: String,
    /// Where the command was invoked; combined artifacts land here.
    pub origin_path: PathBuf,
    /// Logical template name (final path segment), e.g. `vpc`.
    pub template_name: String,
    /// Template path relative to the root, e.g. `network/vpc`.
    pub template_path: PathBuf,
    /// Path of the marker file.
    pub marker_path: PathBuf,
    /// Project root: the marker file's directory.
    pub root_path: PathBuf,
}

impl From<&LoadRequest> for Identity {
    fn from(request: &LoadRequest) -> Self {
        Self {
            environment: request.environment.clone(),
            origin_path: request.origin_path.clone(),
            template_name: request.template_name.clone(),
            template_path: request.template_path.clone(),
            marker_path: request.marker_path.clone(),
            root_path: request.root_path.clone(),
        }
    }
}

/// A fully derived configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    identity: Identity,
    schema: Schema,
    tree: Tree,
}

impl TreeConfig {
    pub(crate) fn new(identity: Identity, schema: Schema) -> Self {
        let tree = Tree::derive(
            &schema,
            &identity.environment,
            &identity.origin_path,
            &identity.root_path,
            &identity.template_path,
        );
        Self {
            identity,
            schema,
            tree,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The effective schema: defaults with the project's overrides applied.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn environment(&self) -> &str {
        &self.identity.environment
    }

    pub fn origin_path(&self) -> &Path {
        &self.identity.origin_path
    }

    pub fn template_name(&self) -> &str {
        &self.identity.template_name
    }

    pub fn template_path(&self) -> &Path {
        &self.identity.template_path
    }

    pub fn marker_path(&self) -> &Path {
        &self.identity.marker_path
    }

    pub fn root_path(&self) -> &Path {
        &self.identity.root_path
    }

    /// Ancestor directories, root first, template last.
    pub fn ancestors(&self) -> &[PathBuf] {
        self.tree.ancestors()
    }

    pub fn value_files(&self) -> &[PathBuf] {
        self.tree.value_files()
    }

    pub fn tf_dirs(&self) -> &[PathBuf] {
        self.tree.tf_dirs()
    }

    pub fn derived_files(&self) -> &[PathBuf] {
        self.tree.derived_files()
    }

    pub fn combined(&self) -> &CombinedPaths {
        self.tree.combined()
    }

    pub fn remote_file(&self) -> &Path {
        self.tree.remote_file()
    }

    pub fn layers(&self) -> impl ExactSizeIterator<Item = Layer<'_>> + '_ {
        self.tree.layers()
    }

    /// Values file relative to any node, e.g. `env/dev.tfvars`.
    pub fn env_val_path(&self) -> PathBuf {
        tree::env_val_path(&self.schema, &self.identity.environment)
    }

    /// Layer directory relative to any node, e.g. `env`.
    pub fn env_tf_path(&self) -> PathBuf {
        tree::env_tf_path(&self.schema)
    }

    /// Derived file relative to any node, e.g. `env/derived.tfvars`.
    pub fn env_derived_path(&self) -> PathBuf {
        tree::env_derived_path(&self.schema)
    }

    /// Classify the origin, distinguishing I/O failures from "leaf".
    pub fn branch_status(&self) -> Result<NodeKind, ColonizeError> {
        classify::classify(&self.identity.origin_path, &self.schema.branch_order_file)
    }

    /// Classify any other node of the tree with this project's sentinel name.
    pub fn classify(&self, dir: &Path) -> Result<NodeKind, ColonizeError> {
        classify::classify(dir, &self.schema.branch_order_file)
    }

    /// True iff the sentinel file exists directly under the origin.
    pub fn is_branch(&self) -> bool {
        classify::is_branch_dir(&self.identity.origin_path, &self.schema.branch_order_file)
    }

    pub fn is_not_branch(&self) -> bool {
        !self.is_branch()
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_branch()
    }

    pub fn is_not_leaf(&self) -> bool {
        !self.is_leaf()
    }
}
