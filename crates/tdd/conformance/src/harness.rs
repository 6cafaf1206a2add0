//! Test harness for running conformance tests

use crate::reports::ConformanceReport;
use crate::{ConformanceConfig, ConformanceRunner};
use tdd_client::DirectoryClient;

/// Test harness for conformance testing
pub struct TestHarness {
    runner: ConformanceRunner,
}

impl TestHarness {
    /// Create a new test harness with default configuration
    pub fn new() -> Self {
        Self {
            runner: ConformanceRunner::new(ConformanceConfig::default()),
        }
    }

    /// Create a test harness with custom configuration
    pub fn with_config(config: ConformanceConfig) -> Self {
        Self {
            runner: ConformanceRunner::new(config),
        }
    }

    /// Run conformance tests and return report
    pub async fn run(&self, client: &DirectoryClient) -> ConformanceReport {
        self.runner.run(client).await
    }

    /// Run tests and assert conformance
    pub async fn assert_conformant(&self, client: &DirectoryClient) {
        let report = self.runner.run(client).await;

        if !report.is_conformant() {
            panic!(
                "Directory '{}' is not conformant:\n{}",
                report.directory_url,
                report.to_text()
            );
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
