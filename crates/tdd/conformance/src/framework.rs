//! Conformance test framework

use crate::reports::{ConformanceReport, TestCategory, TestResult};
use crate::scenarios;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tdd_client::DirectoryClient;

/// Configuration for conformance testing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceConfig {
    /// Categories to run, in order
    pub categories: Vec<TestCategory>,

    /// Keep running categories after one has failed
    pub continue_on_failure: bool,

    /// Log every step result as it is recorded
    pub verbose: bool,
}

impl Default for ConformanceConfig {
    fn default() -> Self {
        Self {
            categories: TestCategory::ALL.to_vec(),
            continue_on_failure: true,
            verbose: false,
        }
    }
}

impl ConformanceConfig {
    /// Run only the given categories.
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = TestCategory>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }
}

/// Conformance test runner
pub struct ConformanceRunner {
    config: ConformanceConfig,
}

impl ConformanceRunner {
    /// Create a new conformance runner
    pub fn new(config: ConformanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConformanceConfig {
        &self.config
    }

    /// Run the configured categories against a directory
    pub async fn run(&self, client: &DirectoryClient) -> ConformanceReport {
        let start = Instant::now();
        let mut report = ConformanceReport::new(client.base_url().to_string());

        tracing::info!("Starting conformance tests for: {}", client.base_url());

        let mut halted = false;
        for &category in &self.config.categories {
            if halted {
                report.add_results(
                    category,
                    vec![TestResult::skipped(
                        category.as_str(),
                        "an earlier category failed",
                    )],
                );
                continue;
            }

            tracing::info!("Running {} conformance tests...", category);
            let results = scenarios::run_category(client, category).await;
            let failed = results.iter().filter(|r| r.is_failed()).count();

            if self.config.verbose {
                for result in &results {
                    tracing::info!(
                        test = result.name.as_str(),
                        status = ?result.status,
                        duration = ?result.duration,
                        "step recorded"
                    );
                }
            }
            tracing::info!(
                "{} tests complete: {} results, {} failed",
                category,
                results.len(),
                failed
            );

            report.add_results(category, results);
            if failed > 0 && !self.config.continue_on_failure {
                halted = true;
            }
        }

        report.duration = start.elapsed();
        report.finalize();

        tracing::info!(
            "Conformance tests complete: {} passed, {} failed, {} skipped",
            report.passed_count(),
            report.failed_count(),
            report.skipped_count()
        );

        report
    }
}
