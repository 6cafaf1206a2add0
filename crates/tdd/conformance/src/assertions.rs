//! Assertions used by scenario bodies
//!
//! Each failure carries both the expected and the actual value verbatim, so a
//! report is readable without re-running the scenario.

use crate::error::{ScenarioError, StepResult};
use serde_json::Value;
use tdd_client::{media, DirectoryResponse};
use tdd_model::{equality, ThingDescription};

/// The response status must be `expected`.
pub fn assert_status(response: &DirectoryResponse, expected: u16) -> StepResult {
    if response.status() == expected {
        Ok(())
    } else {
        Err(ScenarioError::UnexpectedStatus {
            expected,
            actual: response.status(),
            body: response.body_text(),
        })
    }
}

/// The response media type must be `expected`; parameters such as charset
/// are ignored.
pub fn assert_media_type(response: &DirectoryResponse, expected: &str) -> StepResult {
    match response.content_type() {
        Some(actual) if media::same_media_type(actual, expected) => Ok(()),
        actual => Err(ScenarioError::UnexpectedMediaType {
            expected: expected.to_string(),
            actual: actual.map(str::to_string),
        }),
    }
}

/// The two documents must be semantically equal.
pub fn assert_semantic_eq(expected: &ThingDescription, actual: &ThingDescription) -> StepResult {
    match equality::first_difference(expected, actual) {
        None => Ok(()),
        Some(difference) => Err(ScenarioError::SemanticMismatch {
            difference,
            expected: render(expected),
            actual: render(actual),
        }),
    }
}

fn render(td: &ThingDescription) -> String {
    serde_json::to_string_pretty(&Value::Object(td.clone()))
        .unwrap_or_else(|_| format!("{:?}", td))
}
