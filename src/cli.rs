//! Clap adapter for colonize.
//!
//! Compiled only with the `clap` Cargo feature (on by default). It offers
//! [`TreeArgs`], a clap derive struct carrying the two inputs every
//! tree-aware command needs: the environment and the template directory.
//! Embed it with `#[command(flatten)]`:
//!
//! ```ignore
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     tree: TreeArgs,
//! }
//! ```
//!
//! The only bridge to the core is [`TreeArgs::into_request()`]. Everything
//! else goes through the clap-free loader API.

use std::path::PathBuf;

use clap::Args;

use crate::builder::TreeLoader;
use crate::config::TreeConfig;
use crate::error::LoadFailure;
use crate::types::TreeRequest;

/// Clap-derived args selecting an environment and a template.
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Environment to resolve (e.g. "dev", "prod").
    #[arg(short, long)]
    pub environment: String,

    /// Template directory. Defaults to the current directory.
    #[arg(short, long, value_name = "DIR")]
    pub path: Option<PathBuf>,
}

impl TreeArgs {
    /// Convert clap-parsed args into a framework-agnostic [`TreeRequest`].
    pub fn into_request(self) -> TreeRequest {
        TreeRequest {
            path: self.path.unwrap_or_else(|| PathBuf::from(".")),
            environment: self.environment,
        }
    }

    /// Load the selected template with `loader`.
    pub fn load_with(self, loader: &TreeLoader) -> Result<TreeConfig, LoadFailure> {
        let request = self.into_request();
        loader.load_in_tree(&request.path, &request.environment)
    }
}
