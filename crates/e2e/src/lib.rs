//! Storefront CSV-upload E2E test framework
//!
//! This crate drives the Storefront upload page through a real browser and
//! diffs the application's reported outcome against golden expectations:
//! - Controls Playwright via generated Node scripts
//! - Parses the JSON outcome the page renders into its result container
//! - Verifies derived row counts against the expected-results fixture
//! - Runs the static scenario catalog and writes a JSON report
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Scenario Runner (Rust)                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ScenarioRunner                                             │
//! │    ├── run_case(case) -> ScenarioReport                     │
//! │    └── run_all() -> SuiteReport                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  UploadPage (Playwright)                                    │
//! │    ├── navigate(url)                                        │
//! │    ├── upload_file(path)                                    │
//! │    ├── submit()                                             │
//! │    └── get_results() -> UploadResult                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  verify(UploadResult, Expectation, ExpectedStatus)          │
//! │    └── -> Vec<String>   (discrepancies; empty = pass)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod error;
pub mod fixtures;
pub mod health;
pub mod outcome;
pub mod page;
pub mod runner;
pub mod verify;

pub use catalog::{ExpectedStatus, ScenarioCase};
pub use error::{E2eError, E2eResult};
pub use fixtures::Expectation;
pub use outcome::UploadResult;
pub use runner::ScenarioRunner;
