//! Scenario catalog: the static table of upload cases

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level status the application is expected to report for a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedStatus {
    Success,
    Error,
}

impl ExpectedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedStatus::Success => "success",
            ExpectedStatus::Error => "error",
        }
    }
}

/// One upload scenario: a CSV input, its key into the expected-results
/// fixture, and the status the application should report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioCase {
    pub csv_path: PathBuf,
    pub expected_key: String,
    pub expected_status: ExpectedStatus,
}

impl ScenarioCase {
    fn new(data_dir: &Path, file: &str, key: &str, status: ExpectedStatus) -> Self {
        Self {
            csv_path: data_dir.join(file),
            expected_key: key.to_string(),
            expected_status: status,
        }
    }

    /// Scenario name used in logs and reports: the CSV file name.
    pub fn name(&self) -> String {
        self.csv_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.csv_path.display().to_string())
    }

    /// The full upload scenario table, in execution order. Each row names a
    /// CSV under `data_dir` and its entry in `expected_results.json`.
    ///
    /// The last row names a file that does not exist on disk, so the
    /// missing-input-file path is itself exercised on every run.
    pub fn catalog(data_dir: &Path) -> Vec<ScenarioCase> {
        use ExpectedStatus::{Error, Success};

        vec![
            Self::new(data_dir, "valid_products.csv", "valid_products", Success),
            Self::new(data_dir, "invalid_products.csv", "invalid_products", Error),
            Self::new(data_dir, "missing_price.csv", "missing_price", Error),
            Self::new(data_dir, "empty_file.csv", "empty_file", Error),
            Self::new(data_dir, "header_only.csv", "header_only", Success),
            Self::new(data_dir, "non_numeric_price.csv", "non_numeric_price", Error),
            Self::new(data_dir, "negative_price.csv", "negative_price", Error),
            Self::new(data_dir, "missing_headers.csv", "missing_headers", Error),
            Self::new(data_dir, "valid_productsss.csv", "valid_products", Success),
        ]
    }
}
