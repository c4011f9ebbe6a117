//! Test assertions for processing results.

use crate::violations::ValidationError;

/// Asserts that processing succeeded.
pub fn assert_valid(result: &Result<(), ValidationError>) {
    if let Err(err) = result {
        panic!("Expected value to be valid, got: {err}");
    }
}

/// Asserts that processing failed and returns the error.
pub fn assert_invalid(result: &Result<(), ValidationError>) -> &ValidationError {
    match result {
        Ok(()) => panic!("Expected value to be invalid, but it passed"),
        Err(err) => err,
    }
}

/// Asserts that processing failed with exactly `expected` as its wire form.
pub fn assert_violations(result: &Result<(), ValidationError>, expected: &serde_json::Value) {
    let actual = assert_invalid(result).to_value();
    assert_eq!(
        &actual, expected,
        "Expected violations {expected}, got {actual}"
    );
}
