//! Driver error types

use thiserror::Error;

/// Errors raised by the directory driver
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, deadline or body read failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Base URL or request path could not form a valid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Request or response body is not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the request hit its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport(e) if e.is_timeout())
    }
}

/// Result type for driver operations
pub type ClientResult<T> = Result<T, ClientError>;
