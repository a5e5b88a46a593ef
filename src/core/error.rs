//! Error types for the distribution tree engine

use thiserror::Error;

/// Main error type for tree construction, encoding and proof extraction.
///
/// All variants are fail-fast caller errors; none are retryable. A mismatched
/// proof is not an error; verification returns `false` for it.
#[derive(Error, Debug)]
pub enum DistributorError {
    /// Invalid or missing construction options
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    /// A tree cannot be built from zero leaf records
    #[error("Cannot build a merkle tree from an empty record set")]
    EmptyInput,

    /// Proof requested for a record that is not in the tree
    #[error("Record not found in tree: {key}")]
    RecordNotFound { key: String },

    /// JSON serialization errors
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl DistributorError {
    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }

    /// Create a new record not found error
    pub fn record_not_found(key: impl Into<String>) -> Self {
        Self::RecordNotFound { key: key.into() }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, DistributorError>;
