//! Strict-mode validation: detect unknown keys in a marker file.
//!
//! Uses `serde_ignored` to deserialize into the schema's all-optional layer and
//! capture any keys the layer doesn't consume. Reports each unknown key with the
//! marker path and a best-effort line number.

use std::path::Path;

use confique::Config;

use crate::error::ColonizeError;
use crate::schema::Schema;

pub(crate) type SchemaLayer = <Schema as Config>::Layer;

/// Keys whose values are free text or suffixes rather than path segments.
const NON_PATH_KEYS: &[&str] = &["autogenerate_comment", "vals_file_env_post_string"];

/// Reject path-like conventions that are absolute.
///
/// Every per-node projection is joined beneath its node, so an absolute value
/// would replace the node instead of nesting inside it.
pub fn validate_relative_values(schema: &Schema, path: &Path) -> Result<(), ColonizeError> {
    for (key, value) in schema.entries() {
        if NON_PATH_KEYS.contains(&key) {
            continue;
        }
        let candidate = Path::new(value);
        if candidate.has_root() || candidate.is_absolute() {
            return Err(ColonizeError::AbsoluteValue {
                key: key.into(),
                value: value.into(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Validate that a YAML marker document contains no keys unknown to [`Schema`].
///
/// The content must already be known to be a non-blank document.
pub fn validate_unknown_keys(content: &str, path: &Path) -> Result<(), ColonizeError> {
    let mut unknown_keys: Vec<String> = Vec::new();

    let deserializer = serde_yaml::Deserializer::from_str(content);
    let _layer: SchemaLayer = serde_ignored::deserialize(deserializer, |ignored_path| {
        unknown_keys.push(ignored_path.to_string());
    })
    .map_err(|e| ColonizeError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if unknown_keys.is_empty() {
        return Ok(());
    }

    let errors: Vec<ColonizeError> = unknown_keys
        .into_iter()
        .map(|key| {
            let line = find_key_line(content, &key);
            ColonizeError::UnknownKey {
                key,
                path: path.to_path_buf(),
                line,
            }
        })
        .collect();

    Err(ColonizeError::UnknownKeys(errors))
}

/// Find the 1-indexed line of a top-level YAML key.
///
/// Only unindented `key:` lines are considered; for a dotted path the first
/// segment is searched. Returns 0 if the key cannot be located.
fn find_key_line(content: &str, dotted_key: &str) -> usize {
    let top = dotted_key.split('.').next().unwrap_or(dotted_key);

    for (i, line) in content.lines().enumerate() {
        if line.starts_with(char::is_whitespace) {
            continue;
        }
        let unquoted = line.trim_start_matches(['"', '\'']);
        if let Some(after_key) = unquoted.strip_prefix(top)
            && after_key.trim_start_matches(['"', '\'']).starts_with(':')
        {
            return i + 1;
        }
    }
    0
}

/// Whether a YAML document declares nothing: only blank lines, comments and
/// document markers.
pub fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "---" || trimmed == "..."
    })
}
