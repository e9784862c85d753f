//! Error types for the cost engine.

use std::fmt;

use thiserror::Error;

/// Result type alias for cost operations.
pub type CostResult<T> = Result<T, CostError>;

/// Kind of pricing catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Model,
    Feature,
    SetupItem,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Model => write!(f, "model"),
            EntryKind::Feature => write!(f, "feature"),
            EntryKind::SetupItem => write!(f, "setup item"),
        }
    }
}

/// Errors that can occur while pricing a workload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CostError {
    #[error("Pricing catalog has no {kind} entry named '{name}'")]
    MissingEntry { kind: EntryKind, name: String },

    #[error("Pricing catalog {kind} entry '{name}' is disabled")]
    DisabledEntry { kind: EntryKind, name: String },

    #[error("Invalid pricing catalog: {}", .0.join("; "))]
    InvalidCatalog(Vec<String>),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),
}

impl CostError {
    /// Whether this error comes from an absent, disabled or incomplete catalog.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingEntry { .. } | Self::DisabledEntry { .. } | Self::InvalidCatalog(_)
        )
    }

    /// Whether this error comes from an invalid workload.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::UnknownModel(_) | Self::PreconditionViolation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let missing = CostError::MissingEntry {
            kind: EntryKind::Feature,
            name: "tool_call".to_string(),
        };
        assert!(missing.is_configuration());
        assert!(!missing.is_precondition());

        let unknown = CostError::UnknownModel("gpt-9".to_string());
        assert!(unknown.is_precondition());
        assert!(!unknown.is_configuration());
    }

    #[test]
    fn test_invalid_catalog_message_joins_errors() {
        let err = CostError::InvalidCatalog(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Invalid pricing catalog: a; b");
    }

    #[test]
    fn test_disabled_entry_message() {
        let err = CostError::DisabledEntry {
            kind: EntryKind::Model,
            name: "custom".to_string(),
        };
        assert_eq!(err.to_string(), "Pricing catalog model entry 'custom' is disabled");
    }
}
