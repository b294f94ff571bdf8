//! Result verification: diff an upload outcome against its golden record
//!
//! Pure comparison logic. The only side effect is `tracing` emission, so the
//! comparator is unit-testable without a logging sink. All checks run before
//! returning: a scenario's discrepancies are collected exhaustively, never
//! short-circuited at the first mismatch.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::catalog::ExpectedStatus;
use crate::fixtures::Expectation;
use crate::outcome::UploadResult;

/// Discrepancy recorded when the application reports neither an error list
/// nor a message despite an expected error status.
pub const NO_ERRORS_REPORTED: &str =
    "Expected error status but no errors or message were returned in response";

/// Integer immediately following the literal `row`, with or without an
/// intervening space (`"row 3"` and `"row5"` both match).
static ROW_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"row\s*(\d+)").expect("row-number pattern compiles"));

/// Compare an upload outcome against its golden record.
///
/// Derived metrics are recomputed here, never read from the response:
/// the success count is the length of `data`, the error-row count is the
/// number of row-numbered error messages, and the total is their sum.
/// Returns the ordered list of human-readable discrepancies; empty means
/// the scenario passed.
pub fn verify(
    result: &UploadResult,
    expectation: &Expectation,
    expected_status: ExpectedStatus,
) -> Vec<String> {
    let mut failures = Vec::new();

    let actual_success_count = result.data.as_ref().map_or(0, |rows| rows.len() as i64);
    debug!(actual_success_count, "counted successful rows");

    let actual_errors = collect_errors(result);

    if expected_status == ExpectedStatus::Error && actual_errors.is_empty() {
        warn!("expected error status but response carried no errors or message");
        failures.push(NO_ERRORS_REPORTED.to_string());
    }

    let error_rows = extract_error_rows(&actual_errors);
    let actual_error_rows_count = error_rows.len() as i64;
    let actual_total = actual_success_count + actual_error_rows_count;
    debug!(actual_error_rows_count, actual_total, "derived row counts");

    if result.status != expected_status.as_str() {
        failures.push(format!(
            "Expected status '{}', got '{}'",
            expected_status.as_str(),
            result.status
        ));
    }

    if actual_success_count != expectation.success_count {
        failures.push(format!(
            "Expected {} successes, got {}",
            expectation.success_count, actual_success_count
        ));
    }

    if actual_error_rows_count != expectation.error_count {
        failures.push(format!(
            "Expected {} errors, got {}",
            expectation.error_count, actual_error_rows_count
        ));
    }

    if actual_total != expectation.total {
        failures.push(format!(
            "Expected total {}, got {}",
            expectation.total, actual_total
        ));
    }

    let missing: Vec<&str> = expectation
        .expected_errors
        .iter()
        .filter(|e| !actual_errors.contains(e))
        .map(String::as_str)
        .collect();
    let unexpected: Vec<&str> = actual_errors
        .iter()
        .filter(|e| !expectation.expected_errors.contains(e))
        .map(String::as_str)
        .collect();

    if !missing.is_empty() {
        warn!(?missing, "expected errors absent from response");
        failures.push(format!("Missing expected errors: {missing:?}"));
    }

    if !unexpected.is_empty() {
        warn!(?unexpected, "response carried errors not in expectations");
        failures.push(format!("Unexpected errors found: {unexpected:?}"));
    }

    failures
}

/// The error messages carried by a result: the `errors` list when present
/// and non-empty, else the `message` as a singleton, else nothing.
fn collect_errors(result: &UploadResult) -> Vec<String> {
    match &result.errors {
        Some(errors) if !errors.is_empty() => errors.clone(),
        _ => match &result.message {
            Some(message) => vec![message.clone()],
            None => Vec::new(),
        },
    }
}

/// Extract row numbers from error messages that mention `row`.
///
/// Each message contributes at most its first `row <n>` match. Messages
/// with no parsable row number are skipped and continue: they still count
/// as errors, just not as error rows. Duplicates are kept and row numbers
/// are not validated against the input's row count.
pub fn extract_error_rows(errors: &[String]) -> Vec<i64> {
    errors
        .iter()
        .filter_map(|error| {
            ROW_NUMBER
                .captures(error)
                .and_then(|caps| caps[1].parse::<i64>().ok())
        })
        .collect()
}
