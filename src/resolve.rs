//! Schema resolution: overlay a marker file's declarations on the defaults.
//!
//! Operates on the already-read marker content with no I/O. Steps:
//!
//! 1. Blank documents (comments, `---`, nothing else) declare no overrides
//! 2. Validate unknown keys (if strict mode)
//! 3. Deserialize the document into the schema's all-optional layer
//! 4. Let confique fill every undeclared key from the compiled defaults
//! 5. Reject path-like values that are absolute

use std::path::Path;

use confique::Config;
use tracing::debug;

use crate::error::ColonizeError;
use crate::schema::Schema;
use crate::validate::{self, SchemaLayer};

/// Resolve the effective [`Schema`] from a marker file's content.
///
/// `path` is only used for error messages.
pub fn resolve_schema(content: &str, path: &Path, strict: bool) -> Result<Schema, ColonizeError> {
    if validate::is_blank_document(content) {
        debug!(marker = %path.display(), "marker declares no overrides");
        return Schema::defaults();
    }

    if strict {
        validate::validate_unknown_keys(content, path)?;
    }

    let layer: SchemaLayer =
        serde_yaml::from_str(content).map_err(|e| ColonizeError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

    let schema = Schema::builder().preloaded(layer).load()?;
    validate::validate_relative_values(&schema, path)?;
    debug!(marker = %path.display(), "applied marker overrides");
    Ok(schema)
}
