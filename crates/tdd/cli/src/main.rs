//! Thing Description directory conformance runner
//!
//! Drives a live directory through create, retrieve, replace, patch, delete
//! and list, then prints the conformance report. Exits with status 1 when the
//! directory is not conformant.

use anyhow::Context;
use clap::Parser;
use std::time::Duration;
use tdd_client::{DirectoryClient, DirectoryConfig};
use tdd_conformance::{ConformanceConfig, ConformanceRunner, TestCategory};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod output;

use output::OutputFormat;

/// Conformance runner CLI
#[derive(Parser, Debug)]
#[command(name = "tdd-conformance")]
#[command(about = "Conformance tests for Thing Description directories", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory base URL
    #[arg(short, long, env = "TDD_ENDPOINT", default_value = tdd_client::config::DEFAULT_BASE_URL)]
    endpoint: String,

    /// Deadline for each request, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Deadline for establishing a connection, in seconds
    #[arg(long, default_value_t = 10)]
    connect_timeout_secs: u64,

    /// User-Agent sent with every request
    #[arg(long, env = "TDD_USER_AGENT")]
    user_agent: Option<String>,

    /// Category to run (repeatable); all categories when omitted
    #[arg(short, long = "category")]
    categories: Vec<TestCategory>,

    /// Skip remaining categories after the first failing one
    #[arg(long)]
    fail_fast: bool,

    /// Output format (text, json)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn directory_config(&self) -> DirectoryConfig {
        let config = DirectoryConfig::new(&self.endpoint)
            .with_request_timeout(Duration::from_secs(self.timeout_secs))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs));
        match &self.user_agent {
            Some(user_agent) => config.with_user_agent(user_agent),
            None => config,
        }
    }

    fn conformance_config(&self) -> ConformanceConfig {
        let mut config = ConformanceConfig {
            continue_on_failure: !self.fail_fast,
            verbose: self.verbose,
            ..Default::default()
        };
        if !self.categories.is_empty() {
            config = config.with_categories(self.categories.iter().copied());
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let client = DirectoryClient::new(cli.directory_config())
        .with_context(|| format!("invalid directory endpoint '{}'", cli.endpoint))?;

    let report = ConformanceRunner::new(cli.conformance_config())
        .run(&client)
        .await;

    let rendered = output::render(&report, cli.output).context("failed to render report")?;
    println!("{}", rendered);

    if !report.is_conformant() {
        std::process::exit(1);
    }
    Ok(())
}
