//! Error types for E2E testing
//!
//! Two disjoint classes: assertion failures ([`E2eError::ScenarioFailed`],
//! the collected expected-vs-actual mismatches of one scenario) and
//! infrastructure failures (everything else). Assertion failures are
//! reported with the full discrepancy list; infrastructure failures abort
//! with a distinct error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Input CSV not found: {0}")]
    InputFileNotFound(PathBuf),

    #[error("Expected results file not found: {0}")]
    FixtureNotFound(PathBuf),

    #[error("Malformed expected results file {path}: {detail}")]
    FixtureMalformed { path: PathBuf, detail: String },

    #[error("Key '{key}' not found in expected results file {path}")]
    ExpectationKeyMissing { key: String, path: PathBuf },

    #[error("Scenario not found in catalog: {0}")]
    ScenarioNotFound(String),

    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("Application not reachable at {url} after {attempts} attempts")]
    AppUnreachable { url: String, attempts: usize },

    #[error("Scenario '{name}' failed:{}", failure_report(.discrepancies))]
    ScenarioFailed {
        name: String,
        discrepancies: Vec<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl E2eError {
    /// True for failures of the harness or its inputs, as opposed to an
    /// expected-vs-actual mismatch. Drives the exit-code split in the
    /// test binary.
    pub fn is_infrastructure(&self) -> bool {
        !matches!(self, E2eError::ScenarioFailed { .. })
    }
}

/// Multi-line failure report: each discrepancy on its own line, wrapped in
/// a visual separator.
pub fn failure_report(discrepancies: &[String]) -> String {
    let separator = format!("\n{}\n", "=".repeat(60));
    format!(
        "{separator}Test failed with the following issues:\n{}{separator}",
        discrepancies.join("\n")
    )
}

pub type E2eResult<T> = Result<T, E2eError>;
