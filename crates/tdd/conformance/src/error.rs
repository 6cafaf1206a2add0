//! Scenario failure taxonomy

use tdd_client::ClientError;
use tdd_model::Difference;
use thiserror::Error;

/// Why a scenario step failed
///
/// A directory correctly rejecting an invalid mutation with 400 is not an
/// error; negative scenarios record it as a passing step.
#[derive(Debug, Clone, Error)]
pub enum ScenarioError {
    /// Connection or deadline failure; never retried
    #[error("transport error: {0}")]
    Transport(String),

    /// The directory answered with a different status
    #[error("expected status {expected}, got {actual}; body: {body}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: String,
    },

    /// The response carries a different media type
    #[error("expected media type {expected}, got {}", .actual.as_deref().unwrap_or("<none>"))]
    UnexpectedMediaType {
        expected: String,
        actual: Option<String>,
    },

    /// Expected and retrieved documents differ
    #[error("documents differ {difference}\nExpected:\n{expected}\nRetrieved:\n{actual}")]
    SemanticMismatch {
        difference: Difference,
        expected: String,
        actual: String,
    },

    /// The body could not be decoded as required
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Anonymous creation returned no Location header
    #[error("system-generated identifier missing from Location header")]
    MissingLocation,

    /// Anonymous creation returned an identifier without the blank-node marker
    #[error("system-generated identifier is not a blank-node identifier: {0}")]
    NotSystemGenerated(String),

    /// A listed item is not a valid TD
    #[error("item {index} in list may not be a TD: {reason}. Got:\n{item}")]
    InvalidListItem {
        index: usize,
        reason: String,
        item: String,
    },
}

impl From<ClientError> for ScenarioError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Json(e) => ScenarioError::InvalidPayload(e.to_string()),
            other => ScenarioError::Transport(other.to_string()),
        }
    }
}

/// Result of a single scenario step
pub type StepResult<T = ()> = Result<T, ScenarioError>;
