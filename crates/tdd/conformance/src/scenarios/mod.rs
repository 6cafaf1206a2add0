//! Conformance scenarios
//!
//! A scenario is a strictly ordered sequence of directory round-trips. Every
//! checked step becomes one [`TestResult`] named `scenario/step`; a failed step
//! is recorded and the scenario carries on or stops, but the failure never
//! leaves the scenario.

pub mod create;
pub mod delete;
pub mod lifecycle;
pub mod list;
pub mod patch;
pub mod retrieve;
pub mod update;

use crate::assertions::assert_status;
use crate::error::{ScenarioError, StepResult};
use crate::reports::{TestCategory, TestResult};
use std::time::Instant;
use tdd_client::DirectoryClient;
use tdd_model::ThingDescription;
use tracing::{debug, warn};

/// Detail key recording a correct 400 on an invalid mutation.
pub const VALIDATION_REJECTED: &str = "validation_rejected";

/// Run every scenario of a category.
pub async fn run_category(client: &DirectoryClient, category: TestCategory) -> Vec<TestResult> {
    match category {
        TestCategory::Creation => create::run(client).await,
        TestCategory::Retrieval => retrieve::run(client).await,
        TestCategory::Update => update::run(client).await,
        TestCategory::PartialUpdate => patch::run(client).await,
        TestCategory::Deletion => delete::run(client).await,
        TestCategory::Listing => list::run(client).await,
        TestCategory::Lifecycle => lifecycle::run(client).await,
    }
}

/// Collects the step results of one scenario
pub struct Steps {
    scenario: String,
    results: Vec<TestResult>,
    step_started: Instant,
}

impl Steps {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            results: Vec::new(),
            step_started: Instant::now(),
        }
    }

    fn name(&self, step: &str) -> String {
        format!("{}/{}", self.scenario, step)
    }

    /// Record a step outcome. Returns whether the step passed.
    pub fn record(&mut self, step: &str, outcome: StepResult) -> bool {
        self.push(step, outcome, None)
    }

    /// Record a step that expects the directory to reject a mutation.
    pub fn record_rejection(&mut self, step: &str, outcome: StepResult) -> bool {
        self.push(step, outcome, Some(VALIDATION_REJECTED))
    }

    /// Record a step that did not run.
    pub fn skip(&mut self, step: &str, reason: impl Into<String>) {
        self.results.push(TestResult::skipped(self.name(step), reason));
        self.step_started = Instant::now();
    }

    /// Unwrap a step value, recording the failure under `step` if there is one.
    pub fn require<T>(&mut self, step: &str, outcome: StepResult<T>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(step, Err(err), None);
                None
            }
        }
    }

    pub fn finish(self) -> Vec<TestResult> {
        self.results
    }

    fn push(&mut self, step: &str, outcome: StepResult, detail: Option<&str>) -> bool {
        let name = self.name(step);
        let duration = self.step_started.elapsed();
        self.step_started = Instant::now();

        match outcome {
            Ok(()) => {
                let mut result = TestResult::passed(name, duration);
                if let Some(detail) = detail {
                    result.add_detail("outcome", detail);
                }
                self.results.push(result);
                true
            }
            Err(err) => {
                warn!(step = name.as_str(), error = %err, "conformance step failed");
                self.results
                    .push(TestResult::failed(name, err.to_string(), duration));
                false
            }
        }
    }
}

/// PUT a fixture under `id`, requiring 201.
pub(crate) async fn create_thing(
    client: &DirectoryClient,
    id: &str,
    td: &ThingDescription,
) -> StepResult {
    let response = client.create(id, td).await?;
    assert_status(&response, 201)
}

/// Delete a TD a scenario created. The outcome is not a result.
pub(crate) async fn cleanup(client: &DirectoryClient, id: &str) {
    match client.delete(id).await {
        Ok(response) => debug!(id, status = response.status(), "cleanup delete"),
        Err(err) => debug!(id, error = %err, "cleanup delete failed"),
    }
}

/// GET a stored TD, requiring 200 and a TD body.
pub(crate) async fn retrieve_thing(
    client: &DirectoryClient,
    id: &str,
) -> StepResult<ThingDescription> {
    let response = client.retrieve(id).await?;
    assert_status(&response, 200)?;
    response
        .thing()
        .map_err(|e| ScenarioError::InvalidPayload(e.to_string()))
}
