//! Scenario orchestration: drive the page, load expectations, verify

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::catalog::ScenarioCase;
use crate::error::{E2eError, E2eResult};
use crate::fixtures;
use crate::outcome::UploadResult;
use crate::page::{PageConfig, UploadPage};
use crate::verify;

/// Result of one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub passed: bool,
    pub duration_ms: u64,
    pub discrepancies: Vec<String>,

    /// True when the failure was an infrastructure problem (for instance a
    /// missing input file) rather than an expectation mismatch.
    pub infrastructure: bool,
}

/// Result of running the whole catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub scenarios: Vec<ScenarioReport>,
}

/// Configuration for the scenario runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub page: PageConfig,

    /// Directory holding the golden CSV inputs.
    pub data_dir: PathBuf,

    /// Path to the expected-results fixture.
    pub fixture_path: PathBuf,

    /// Output directory for the suite report.
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            data_dir: PathBuf::from("data"),
            fixture_path: PathBuf::from("data/expected_results.json"),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Runs upload scenarios sequentially, one browser session per scenario.
pub struct ScenarioRunner {
    config: RunnerConfig,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Run one scenario end to end.
    ///
    /// The input CSV must exist before any browser interaction starts.
    /// Browser-side failures are substituted with a synthetic error result
    /// and flow through ordinary assertion logic; fixture problems
    /// (missing file, malformed JSON, absent key) propagate as
    /// infrastructure errors. A non-empty discrepancy list becomes
    /// [`E2eError::ScenarioFailed`].
    pub async fn run_case(&self, case: &ScenarioCase) -> E2eResult<()> {
        info!(scenario = %case.name(), "running scenario");

        if !case.csv_path.exists() {
            error!("CSV file not found: {}. Aborting upload.", case.csv_path.display());
            return Err(E2eError::InputFileNotFound(case.csv_path.clone()));
        }

        let mut page = UploadPage::new(self.config.page.clone())?;
        page.navigate(&self.config.page.base_url);
        page.upload_file(&case.csv_path);
        page.submit();

        let result = match page.get_results().await {
            Ok(result) => result,
            Err(e) => {
                warn!("browser run failed, substituting synthetic error result: {e}");
                UploadResult::parse_failure(e)
            }
        };

        // Loaded fresh per scenario; fixture errors are never discrepancies.
        let expectations = fixtures::load_expectations(&self.config.fixture_path)?;
        let expectation =
            fixtures::expectation_for(&expectations, &case.expected_key, &self.config.fixture_path)?;

        let discrepancies = verify::verify(&result, expectation, case.expected_status);
        if discrepancies.is_empty() {
            info!(scenario = %case.name(), "scenario passed");
            Ok(())
        } else {
            Err(E2eError::ScenarioFailed {
                name: case.name(),
                discrepancies,
            })
        }
    }

    /// Run the full static catalog.
    pub async fn run_all(&self) -> E2eResult<SuiteReport> {
        let cases = ScenarioCase::catalog(&self.config.data_dir);
        self.run_cases(&cases).await
    }

    /// Run a list of scenarios sequentially, collecting a suite report.
    ///
    /// Scenario failures (and the catalog's deliberately-missing input
    /// file) are recorded and the run continues; any other infrastructure
    /// error aborts the suite.
    pub async fn run_cases(&self, cases: &[ScenarioCase]) -> E2eResult<SuiteReport> {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut scenarios = Vec::new();
        let mut passed = 0;
        let mut failed = 0;

        info!("Running {} scenario(s)...", cases.len());

        for case in cases {
            let case_start = Instant::now();
            let outcome = self.run_case(case).await;
            let duration_ms = case_start.elapsed().as_millis() as u64;

            match outcome {
                Ok(()) => {
                    passed += 1;
                    info!("✓ {} ({} ms)", case.name(), duration_ms);
                    scenarios.push(ScenarioReport {
                        name: case.name(),
                        passed: true,
                        duration_ms,
                        discrepancies: Vec::new(),
                        infrastructure: false,
                    });
                }
                Err(err) => {
                    let abort = err.is_infrastructure()
                        && !matches!(err, E2eError::InputFileNotFound(_));
                    if abort {
                        return Err(err);
                    }

                    failed += 1;
                    error!("✗ {} - {}", case.name(), err);

                    let (discrepancies, infrastructure) = match err {
                        E2eError::ScenarioFailed { discrepancies, .. } => (discrepancies, false),
                        other => (vec![other.to_string()], true),
                    };
                    scenarios.push(ScenarioReport {
                        name: case.name(),
                        passed: false,
                        duration_ms,
                        discrepancies,
                        infrastructure,
                    });
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Scenario results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        Ok(SuiteReport {
            total: cases.len(),
            passed,
            failed,
            started_at,
            duration_ms,
            scenarios,
        })
    }

    /// Write the suite report to a JSON file in the output directory.
    pub fn write_report(&self, report: &SuiteReport) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("e2e-results.json");
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
