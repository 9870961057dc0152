use std::path::PathBuf;

use thiserror::Error;

use crate::config::{Identity, TreeConfig};

#[derive(Debug, Error)]
pub enum ColonizeError {
    #[error("No {marker} found in {start} or any parent directory")]
    MarkerNotFound { start: PathBuf, marker: String },

    #[error("Unknown key '{key}' in {path} (line {line})")]
    UnknownKey {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown keys in config file")]
    UnknownKeys(Vec<ColonizeError>),

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("'{key}' in {path} must be relative, got '{value}'")]
    AbsoluteValue {
        key: String,
        value: String,
        path: PathBuf,
    },

    #[error("Failed to write YAML: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("Failed to render YAML: {0}")]
    RenderError(#[source] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),

    #[error("{path} is not inside the project root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Key not found: {0}")]
    KeyNotFound(String),
}

/// A failed load, together with whatever was resolved before the failure.
///
/// The identity fields are always set. `fallback` is present when the marker
/// file was read but its overrides could not be applied: it is the same tree
/// derived from the default schema, usable at the caller's discretion.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct LoadFailure {
    #[source]
    pub error: ColonizeError,
    pub identity: Identity,
    pub fallback: Option<Box<TreeConfig>>,
}

impl LoadFailure {
    pub(crate) fn new(error: ColonizeError, identity: Identity) -> Self {
        Self {
            error,
            identity,
            fallback: None,
        }
    }

    pub(crate) fn with_fallback(error: ColonizeError, fallback: TreeConfig) -> Self {
        Self {
            error,
            identity: fallback.identity().clone(),
            fallback: Some(Box::new(fallback)),
        }
    }
}

impl From<LoadFailure> for ColonizeError {
    fn from(failure: LoadFailure) -> Self {
        failure.error
    }
}
