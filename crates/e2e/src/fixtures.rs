//! Golden expectations loaded from the expected-results fixture

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{E2eError, E2eResult};

/// Golden record describing the expected outcome for one CSV upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    /// Total input rows the application should account for.
    pub total: i64,

    /// Rows the application should import successfully.
    pub success_count: i64,

    /// Rows the application should reject with a row-numbered error.
    pub error_count: i64,

    /// Exact error messages the application should report.
    #[serde(default)]
    pub expected_errors: Vec<String>,
}

/// The fixture file: expectation key to Expectation record.
pub type ExpectationMap = BTreeMap<String, Expectation>;

/// Load the fixture mapping from disk.
///
/// A missing or malformed fixture is a test-infrastructure failure, not an
/// assertion failure, and propagates as a distinct error.
pub fn load_expectations(path: &Path) -> E2eResult<ExpectationMap> {
    if !path.exists() {
        return Err(E2eError::FixtureNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let map: ExpectationMap =
        serde_json::from_str(&content).map_err(|e| E2eError::FixtureMalformed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    debug!(keys = map.len(), path = %path.display(), "loaded expected results");
    Ok(map)
}

/// Look up the Expectation for one scenario key.
pub fn expectation_for<'a>(
    map: &'a ExpectationMap,
    key: &str,
    path: &Path,
) -> E2eResult<&'a Expectation> {
    map.get(key).ok_or_else(|| E2eError::ExpectationKeyMissing {
        key: key.to_string(),
        path: path.to_path_buf(),
    })
}
