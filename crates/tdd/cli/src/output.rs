//! Report output formatting

use tdd_conformance::ConformanceReport;

/// Output format for the conformance report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Boxed text report
    #[default]
    Text,
    /// JSON report
    Json,
}

/// Render a report in the specified format
pub fn render(report: &ConformanceReport, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(report.to_text()),
        OutputFormat::Json => report.to_json(),
    }
}
