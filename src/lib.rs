//! Hierarchical, per-environment configuration trees for Terraform projects.
//!
//! A colonize project is a directory tree. The root holds a marker file
//! (`.colonize.yaml`); every directory beneath it is a *template* that may
//! contribute configuration to the templates below it. Given a template and an
//! environment, colonize works out which directories contribute, in which
//! order, and where each one keeps its per-environment files.
//!
//! ```ignore
//! let config = colonize::load_config_in_tree(Path::new("network/vpc"), "dev")?;
//! for layer in config.layers() {
//!     // root first, the template itself last
//!     println!("{}", layer.values.display());
//! }
//! ```
//!
//! # The ancestor chain
//!
//! For a template at `network/vpc` under `/proj`, the chain is:
//!
//! ```text
//! /proj                  ← root, always first
//! /proj/network
//! /proj/network/vpc      ← the template, always last
//! ```
//!
//! Each node is projected into the files it may hold for the environment:
//!
//! | Projection | Path under each node |
//! |------------|----------------------|
//! | values | `env/dev.tfvars` |
//! | layer directory | `env/` |
//! | derived values | `env/derived.tfvars` |
//!
//! The projections are parallel arrays in chain order. Consumers concatenate
//! them node by node, so deeper templates override shallower ones. The chain
//! is strictly linear: there is no dependency graph and no scheduler here.
//!
//! Combined artifacts (`_combined.tfvars`, `_combined.tf`, ...) are anchored at
//! the origin, the directory the command runs in, so they land beside the
//! template being planned. The remote-state bootstrap script lives under the
//! root's environments directory.
//!
//! # Naming conventions
//!
//! Every file and directory name above is a convention from [`Schema`]. The
//! marker file overrides any subset of them; the rest keep their compiled
//! defaults:
//!
//! ```yaml
//! ## Generated by Colonize init
//! ---
//! environments_dir: environments
//! vals_file_env_post_string: .auto.tfvars
//! ```
//!
//! [`Schema::render`] and [`Schema::write_to_file`] produce such a file for
//! scaffolding a new project.
//!
//! # Branches and leaves
//!
//! A template is a *branch* iff its sentinel file (`build_order.txt`) exists
//! directly inside it; otherwise it is a *leaf*, a deployable unit. The
//! sentinel is opt-in: a directory full of shared modules stays a leaf. The
//! sentinel's content (the ordered children) is for orchestrators to read.
//!
//! [`TreeConfig::is_branch`] follows the boolean contract and reports any
//! stat failure as "not a branch". [`TreeConfig::branch_status`] surfaces that
//! failure as an error instead.
//!
//! # Error handling
//!
//! Loading returns `Result<TreeConfig, LoadFailure>`. A [`LoadFailure`] always
//! carries the caller's identity fields. When the marker was read but its
//! overrides could not be applied, it also carries a `fallback` configuration
//! derived from the default schema. `LoadFailure` converts into
//! [`ColonizeError`], so `?` works in functions returning the plain error.
//!
//! # Logging
//!
//! The library never prints. It emits `tracing` events at `debug` and `trace`
//! level; install a subscriber to see them.

pub mod error;
pub mod types;

mod builder;
mod classify;
#[cfg(feature = "clap")]
mod cli;
mod config;
mod file;
mod paths;
mod resolve;
mod schema;
mod tree;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::{Colonize, TreeLoader, load_config, load_config_in_tree};
pub use classify::{NodeKind, classify, is_branch_dir};
#[cfg(feature = "clap")]
pub use cli::TreeArgs;
pub use config::{Identity, TreeConfig};
pub use error::{ColonizeError, LoadFailure};
pub use file::MARKER_FILE;
pub use schema::{MARKER_HEADER, Schema};
pub use tree::{CombinedPaths, Layer, Tree};
pub use types::{LoadRequest, TreeRequest};
