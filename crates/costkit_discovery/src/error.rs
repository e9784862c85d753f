//! Error types for discovery.

use thiserror::Error;

/// Result type alias for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Errors raised while loading or replaying scenarios.
///
/// The conversation itself never fails: every answer is accepted.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Invalid scenario '{name}': {message}")]
    InvalidScenario { name: String, message: String },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
