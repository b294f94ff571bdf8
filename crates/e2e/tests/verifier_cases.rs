//! Parametrized verifier coverage
//!
//! Exercises the comparator against the outcome shapes the application
//! actually produces, one case per golden CSV family.

use serde_json::json;
use test_case::test_case;

use storefront_e2e::catalog::ExpectedStatus;
use storefront_e2e::fixtures::Expectation;
use storefront_e2e::outcome::UploadResult;
use storefront_e2e::verify::{extract_error_rows, verify, NO_ERRORS_REPORTED};

fn result(status: &str, rows: Option<usize>, errors: Option<Vec<&str>>) -> UploadResult {
    UploadResult {
        status: status.to_string(),
        data: rows.map(|n| vec![json!({"name": "Widget", "price": 9.99}); n]),
        errors: errors.map(|e| e.into_iter().map(String::from).collect()),
        message: None,
    }
}

fn expectation(total: i64, success: i64, errors: i64, expected_errors: Vec<&str>) -> Expectation {
    Expectation {
        total,
        success_count: success,
        error_count: errors,
        expected_errors: expected_errors.into_iter().map(String::from).collect(),
    }
}

#[test_case(2, "valid_products"; "two accepted rows")]
#[test_case(0, "header_only"; "header only, nothing to import")]
fn clean_success_uploads_pass(rows: usize, _key: &str) {
    let failures = verify(
        &result("success", Some(rows), None),
        &expectation(rows as i64, rows as i64, 0, vec![]),
        ExpectedStatus::Success,
    );
    assert!(failures.is_empty(), "unexpected discrepancies: {failures:?}");
}

#[test_case(
    vec!["Missing price in row 2"], 1;
    "single missing price"
)]
#[test_case(
    vec!["Missing price in row 2", "Invalid quantity in row 3"], 2;
    "two rejected rows"
)]
fn clean_error_uploads_pass(errors: Vec<&'static str>, error_count: i64) {
    let failures = verify(
        &result("error", None, Some(errors.clone())),
        &expectation(error_count, 0, error_count, errors),
        ExpectedStatus::Error,
    );
    assert!(failures.is_empty(), "unexpected discrepancies: {failures:?}");
}

#[test]
fn file_level_errors_carry_no_row_count() {
    // "File is empty" mentions no row, so it counts as an error message but
    // contributes nothing to the error-row count or the total.
    let failures = verify(
        &result("error", None, Some(vec!["File is empty"])),
        &expectation(0, 0, 0, vec!["File is empty"]),
        ExpectedStatus::Error,
    );
    assert!(failures.is_empty(), "unexpected discrepancies: {failures:?}");
}

#[test]
fn missing_data_field_means_zero_successes() {
    let failures = verify(
        &result("success", None, None),
        &expectation(2, 2, 0, vec![]),
        ExpectedStatus::Success,
    );
    assert!(failures.contains(&"Expected 2 successes, got 0".to_string()));
    assert!(failures.contains(&"Expected total 2, got 0".to_string()));
}

#[test]
fn expected_error_without_any_errors_is_reported() {
    let failures = verify(
        &result("success", Some(1), None),
        &expectation(1, 1, 0, vec![]),
        ExpectedStatus::Error,
    );
    assert_eq!(failures[0], NO_ERRORS_REPORTED);
}

#[test]
fn status_mismatch_alone_is_one_discrepancy() {
    let failures = verify(
        &result("error", None, Some(vec!["Missing price in row 2"])),
        &expectation(1, 0, 1, vec!["Missing price in row 2"]),
        ExpectedStatus::Success,
    );
    assert_eq!(failures, vec!["Expected status 'success', got 'error'".to_string()]);
}

#[test]
fn verifier_is_idempotent_across_calls() {
    let r = result("error", Some(1), Some(vec!["Negative price in row 3", "junk"]));
    let e = expectation(4, 2, 2, vec!["Negative price in row 3"]);
    let first = verify(&r, &e, ExpectedStatus::Error);
    let second = verify(&r, &e, ExpectedStatus::Error);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test_case(&["Error in row 3: bad price"], &[3]; "space separated row number")]
#[test_case(&["row5 malformed"], &[5]; "no space after row")]
#[test_case(&["File is empty"], &[]; "no row mention")]
#[test_case(&["row without a number"], &[]; "unparsable token skipped")]
#[test_case(&["Missing price in row 2", "Missing price in row 2"], &[2, 2]; "duplicates kept")]
#[test_case(&["row 99 out of range"], &[99]; "no range validation")]
fn error_row_extraction(messages: &[&str], expected: &[i64]) {
    let errors: Vec<String> = messages.iter().map(|s| s.to_string()).collect();
    assert_eq!(extract_error_rows(&errors), expected);
}

#[test]
fn missing_and_unexpected_errors_are_both_listed() {
    let failures = verify(
        &result("error", None, Some(vec!["Invalid price in row 3: expected a number"])),
        &expectation(1, 0, 1, vec!["Missing price in row 3"]),
        ExpectedStatus::Error,
    );
    assert_eq!(
        failures,
        vec![
            r#"Missing expected errors: ["Missing price in row 3"]"#.to_string(),
            r#"Unexpected errors found: ["Invalid price in row 3: expected a number"]"#.to_string(),
        ]
    );
}

#[test]
fn synthetic_timeout_result_fails_success_expectation() {
    let failures = verify(
        &UploadResult::timeout(),
        &expectation(2, 2, 0, vec![]),
        ExpectedStatus::Success,
    );
    assert!(failures.contains(&"Expected status 'success', got 'error'".to_string()));
    assert!(failures.contains(&"Expected 2 successes, got 0".to_string()));
    assert!(failures
        .iter()
        .any(|f| f.starts_with("Unexpected errors found: ") && f.contains("Timeout")));
}
