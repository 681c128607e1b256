//! Field validators
//!
//! Each check looks at one raw value and answers pass or fail. They are
//! the building blocks of [`crate::rules::ClaimRuleEngine`] and are also
//! used on their own by entry forms for as-you-type feedback.

use core_kernel::{parse_canonical_date, Amount};

/// Minimum trimmed length of a customer name
pub const MIN_CUSTOMER_NAME_LEN: usize = 2;
/// Minimum trimmed length of a policy number
pub const MIN_POLICY_NUMBER_LEN: usize = 3;
/// Minimum trimmed length of a hospital name
pub const MIN_HOSPITAL_NAME_LEN: usize = 2;

/// True iff the value parses as a canonical `YYYY-MM-DD` date
pub fn is_valid_date(value: &str) -> bool {
    !value.is_empty() && parse_canonical_date(value).is_ok()
}

/// Letters, spaces and `. , ' -`, at least two characters once trimmed
pub fn is_valid_customer_name(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.chars().count() >= MIN_CUSTOMER_NAME_LEN
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphabetic() || matches!(c, ' ' | '.' | ',' | '\'' | '-'))
}

/// ASCII letters, digits, `-` and `_`, at least three characters once trimmed
pub fn is_valid_policy_number(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.chars().count() >= MIN_POLICY_NUMBER_LEN
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// At least two characters once trimmed
pub fn is_valid_hospital_name(value: &str) -> bool {
    value.trim().chars().count() >= MIN_HOSPITAL_NAME_LEN
}

/// Absent amounts pass; present ones must parse as a number `>= 0`
pub fn is_valid_amount(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(raw) => Amount::parse(raw).is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date() {
        assert!(is_valid_date("2024-01-10"));
        assert!(is_valid_date("2024-02-29"));
        assert!(!is_valid_date("2023-02-29"));
        assert!(!is_valid_date("10-01-2024"));
        assert!(!is_valid_date(""));
    }

    #[test]
    fn test_customer_name() {
        assert!(is_valid_customer_name("A. Singh"));
        assert!(is_valid_customer_name("O'Brien-Smith, Jr."));
        assert!(is_valid_customer_name("  Al  "));
        assert!(!is_valid_customer_name("A"));
        assert!(!is_valid_customer_name("R2D2"));
        assert!(!is_valid_customer_name("Name@Home"));
    }

    #[test]
    fn test_policy_number() {
        assert!(is_valid_policy_number("POL-123"));
        assert!(is_valid_policy_number("a_1"));
        assert!(!is_valid_policy_number("P1"));
        assert!(!is_valid_policy_number("POL 123"));
        assert!(!is_valid_policy_number("POL/123"));
    }

    #[test]
    fn test_hospital_name() {
        assert!(is_valid_hospital_name("City Hospital"));
        assert!(!is_valid_hospital_name(" X "));
    }

    #[test]
    fn test_amount() {
        assert!(is_valid_amount(None));
        assert!(is_valid_amount(Some("0")));
        assert!(is_valid_amount(Some("1250.75")));
        assert!(!is_valid_amount(Some("-1")));
        assert!(!is_valid_amount(Some("lots")));
    }
}
