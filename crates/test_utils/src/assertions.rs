//! Custom Test Assertions
//!
//! Assertion helpers for validation output that print the full message list
//! on failure.

/// Asserts that `message` appears exactly once in `errors`
pub fn assert_reported_once(errors: &[String], message: &str) {
    let count = errors.iter().filter(|e| e.as_str() == message).count();
    assert_eq!(
        count, 1,
        "Expected exactly one {:?}, got {} in {:?}",
        message, count, errors
    );
}

/// Asserts that `message` does not appear in `errors`
pub fn assert_not_reported(errors: &[String], message: &str) {
    assert!(
        !errors.iter().any(|e| e == message),
        "Did not expect {:?} in {:?}",
        message,
        errors
    );
}
