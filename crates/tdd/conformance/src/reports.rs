//! Conformance test reporting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::time::Duration;

/// Test status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

/// Test category, one per directory operation group
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TestCategory {
    Creation,
    Retrieval,
    Update,
    PartialUpdate,
    Deletion,
    Listing,
    Lifecycle,
}

impl TestCategory {
    /// All categories, in run order
    pub const ALL: [TestCategory; 7] = [
        TestCategory::Creation,
        TestCategory::Retrieval,
        TestCategory::Update,
        TestCategory::PartialUpdate,
        TestCategory::Deletion,
        TestCategory::Listing,
        TestCategory::Lifecycle,
    ];

    /// Machine-readable name, as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            TestCategory::Creation => "creation",
            TestCategory::Retrieval => "retrieval",
            TestCategory::Update => "update",
            TestCategory::PartialUpdate => "partial_update",
            TestCategory::Deletion => "deletion",
            TestCategory::Listing => "listing",
            TestCategory::Lifecycle => "lifecycle",
        }
    }
}

impl std::fmt::Display for TestCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestCategory::Creation => write!(f, "Creation"),
            TestCategory::Retrieval => write!(f, "Retrieval"),
            TestCategory::Update => write!(f, "Update"),
            TestCategory::PartialUpdate => write!(f, "Partial Update"),
            TestCategory::Deletion => write!(f, "Deletion"),
            TestCategory::Listing => write!(f, "Listing"),
            TestCategory::Lifecycle => write!(f, "Lifecycle"),
        }
    }
}

impl FromStr for TestCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        TestCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                let known: Vec<_> = TestCategory::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown category '{}', expected one of: {}", s, known.join(", "))
            })
    }
}

/// Individual test result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    pub duration: Duration,
    pub error: Option<String>,
    pub warnings: Vec<String>,
    pub details: HashMap<String, String>,
}

impl TestResult {
    /// Create a passed test result
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Passed,
            duration,
            error: None,
            warnings: Vec::new(),
            details: HashMap::new(),
        }
    }

    /// Create a failed test result
    pub fn failed(name: impl Into<String>, error: String, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Failed,
            duration,
            error: Some(error),
            warnings: Vec::new(),
            details: HashMap::new(),
        }
    }

    /// Create a skipped test result
    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Skipped,
            duration: Duration::ZERO,
            error: None,
            warnings: vec![reason.into()],
            details: HashMap::new(),
        }
    }

    /// Add a detail to the result
    pub fn add_detail(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.details.insert(key.into(), value.into());
    }

    pub fn is_failed(&self) -> bool {
        self.status == TestStatus::Failed
    }
}

/// Report summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub conformant: bool,
}

/// Complete conformance report for one directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub directory_url: String,
    pub timestamp: DateTime<Utc>,
    pub duration: Duration,
    pub results: BTreeMap<TestCategory, Vec<TestResult>>,
    pub summary: ReportSummary,
}

impl ConformanceReport {
    /// Create a new report
    pub fn new(directory_url: String) -> Self {
        Self {
            directory_url,
            timestamp: Utc::now(),
            duration: Duration::ZERO,
            results: BTreeMap::new(),
            summary: ReportSummary::default(),
        }
    }

    /// Add results for a category, after any already recorded for it
    pub fn add_results(&mut self, category: TestCategory, results: Vec<TestResult>) {
        self.results.entry(category).or_default().extend(results);
    }

    /// Finalize the report and compute summary
    pub fn finalize(&mut self) {
        let mut summary = ReportSummary::default();

        for result in self.results.values().flatten() {
            summary.total += 1;
            match result.status {
                TestStatus::Passed => summary.passed += 1,
                TestStatus::Failed => summary.failed += 1,
                TestStatus::Skipped => summary.skipped += 1,
            }
        }

        summary.conformant = summary.failed == 0;
        self.summary = summary;
    }

    /// Get passed count
    pub fn passed_count(&self) -> usize {
        self.summary.passed
    }

    /// Get failed count
    pub fn failed_count(&self) -> usize {
        self.summary.failed
    }

    /// Get skipped count
    pub fn skipped_count(&self) -> usize {
        self.summary.skipped
    }

    /// Check if conformant
    pub fn is_conformant(&self) -> bool {
        self.summary.conformant
    }

    /// Failed results across all categories
    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.results.values().flatten().filter(|r| r.is_failed())
    }

    /// Look up a result by its full name
    pub fn result(&self, name: &str) -> Option<&TestResult> {
        self.results.values().flatten().find(|r| r.name == name)
    }

    /// Generate a text report
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("╔════════════════════════════════════════════════════════════╗\n");
        output.push_str("║  Thing Directory Conformance Report                        ║\n");
        output.push_str("╠════════════════════════════════════════════════════════════╣\n");
        output.push_str(&format!("║  Directory: {:<46} ║\n", self.directory_url));
        output.push_str(&format!(
            "║  Timestamp: {:<46} ║\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!(
            "║  Duration: {:<47} ║\n",
            format!("{:?}", self.duration)
        ));
        output.push_str("╠════════════════════════════════════════════════════════════╣\n");

        for (category, results) in &self.results {
            output.push_str(&format!("║  {} Tests:\n", category));
            output.push_str("╟────────────────────────────────────────────────────────────╢\n");

            for result in results {
                let status_icon = match result.status {
                    TestStatus::Passed => "✓",
                    TestStatus::Failed => "✗",
                    TestStatus::Skipped => "○",
                };

                output.push_str(&format!(
                    "║  {} {:<45} {:>8?}\n",
                    status_icon, result.name, result.duration
                ));

                if let Some(error) = &result.error {
                    for (i, line) in error.lines().enumerate() {
                        if i == 0 {
                            output.push_str(&format!("║      Error: {}\n", line));
                        } else {
                            output.push_str(&format!("║        {}\n", line));
                        }
                    }
                }

                for warning in &result.warnings {
                    output.push_str(&format!("║      Warning: {}\n", warning));
                }
            }

            output.push_str("╟────────────────────────────────────────────────────────────╢\n");
        }

        output.push_str("╠════════════════════════════════════════════════════════════╣\n");
        output.push_str("║  Summary:                                                  ║\n");
        output.push_str(&format!(
            "║    Total: {:<5}  Passed: {:<5}  Failed: {:<5}  Skipped: {:<3} ║\n",
            self.summary.total, self.summary.passed, self.summary.failed, self.summary.skipped
        ));
        output.push_str("║                                                            ║\n");

        if self.summary.conformant {
            output.push_str("║  Result: ✓ CONFORMANT                                      ║\n");
        } else {
            output.push_str("║  Result: ✗ NON-CONFORMANT                                  ║\n");
        }

        output.push_str("╚════════════════════════════════════════════════════════════╝\n");

        output
    }

    /// Generate JSON report
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
