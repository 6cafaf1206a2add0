//! Model error types

use thiserror::Error;

/// Errors raised when a document does not meet the minimum TD shape
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// `title` is absent or null
    #[error("mandatory title is missing")]
    MissingTitle,

    /// `title` is present but not a non-empty string
    #[error("title must be a non-empty string, got {0}")]
    InvalidTitle(String),

    /// The document is not a JSON object
    #[error("expected a JSON object, got {0}")]
    NotAnObject(String),
}

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;
