//! Thing Description Directory Conformance Test Suite
//!
//! This crate drives a live directory through its HTTP API and checks each
//! response against an independent model of what the directory should hold.
//!
//! # Categories
//!
//! - **Creation**: anonymous POST, explicit PUT, rejected POST with an id
//! - **Retrieval**: the `/td/{id}` alias and missing identifiers
//! - **Update**: full replacement with PUT
//! - **Partial Update**: table-driven JSON merge patches, including rejected ones
//! - **Deletion**: delete, delete twice, delete never-created
//! - **Listing**: every listed TD carries a title
//! - **Lifecycle**: one TD from creation to deletion
//!
//! Every step becomes a [`TestResult`]; a failing step never stops the others.
//!
//! # Example
//!
//! ```rust,ignore
//! use tdd_client::{DirectoryClient, DirectoryConfig};
//! use tdd_conformance::{ConformanceConfig, ConformanceRunner};
//!
//! let client = DirectoryClient::new(DirectoryConfig::new("http://localhost:8081"))?;
//! let runner = ConformanceRunner::new(ConformanceConfig::default());
//! let report = runner.run(&client).await;
//! println!("{}", report.to_text());
//! ```

pub mod assertions;
pub mod error;
pub mod framework;
pub mod harness;
pub mod reports;
pub mod scenarios;

pub use error::{ScenarioError, StepResult};
pub use framework::{ConformanceConfig, ConformanceRunner};
pub use harness::TestHarness;
pub use reports::{ConformanceReport, ReportSummary, TestCategory, TestResult, TestStatus};
