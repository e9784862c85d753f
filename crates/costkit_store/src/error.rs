//! Error types for persistence.

use std::path::PathBuf;

use costkit_core::CostError;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing persisted data.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Invalid session id: {0}")]
    InvalidSessionId(String),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    Catalog(#[from] CostError),

    #[error("Simulated failure: {0}")]
    Simulated(String),
}

impl StoreError {
    /// The underlying cost error, when the failure came from catalog validation
    pub fn as_cost_error(&self) -> Option<&CostError> {
        match self {
            Self::Catalog(err) => Some(err),
            _ => None,
        }
    }
}
