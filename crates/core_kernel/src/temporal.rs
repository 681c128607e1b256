//! Calendar date handling
//!
//! Claim dates carry no time component and travel as canonical
//! `YYYY-MM-DD` strings. Entry forms may accept a few regional layouts and
//! normalise them before validation sees the value.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single canonical date layout
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Layouts accepted from entry forms, tried in order
pub const INPUT_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Layout used when timestamps are rendered for people
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors related to temporal values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unrecognised date input '{0}'")]
    UnrecognisedInput(String),

    #[error("Invalid range: {from} is after {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
}

/// Parses a date in the canonical `YYYY-MM-DD` layout
pub fn parse_canonical_date(input: &str) -> Result<NaiveDate, TemporalError> {
    NaiveDate::parse_from_str(input, CANONICAL_DATE_FORMAT)
        .map_err(|_| TemporalError::InvalidDate(input.to_string()))
}

/// Normalises form input into the canonical layout
///
/// Tries each of [`INPUT_DATE_FORMATS`] in turn; day-first wins over
/// month-first when both would parse.
pub fn normalize_date_input(input: &str) -> Result<String, TemporalError> {
    let trimmed = input.trim();
    INPUT_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(format_date)
        .ok_or_else(|| TemporalError::UnrecognisedInput(trimmed.to_string()))
}

/// Renders a date in the canonical layout
pub fn format_date(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

/// Renders a timestamp as `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
}

/// An inclusive, optionally open-ended range of calendar dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range, rejecting `from > to`
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, TemporalError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(TemporalError::InvertedRange { from, to });
            }
        }
        Ok(Self { from, to })
    }

    /// A range with no bounds
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Returns true if neither bound is set
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Checks whether a date falls within the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_canonical() {
        assert_eq!(parse_canonical_date("2024-01-10").unwrap(), date(2024, 1, 10));
    }

    #[test]
    fn test_parse_rejects_other_layouts() {
        assert!(parse_canonical_date("10/01/2024").is_err());
        assert!(parse_canonical_date("2024-02-30").is_err());
        assert!(parse_canonical_date("").is_err());
    }

    #[test]
    fn test_normalize_day_first() {
        assert_eq!(normalize_date_input("10/01/2024").unwrap(), "2024-01-10");
    }

    #[test]
    fn test_normalize_month_first_when_day_first_impossible() {
        assert_eq!(normalize_date_input("01/25/2024").unwrap(), "2024-01-25");
    }

    #[test]
    fn test_normalize_slashed_iso() {
        assert_eq!(normalize_date_input(" 2024/03/05 ").unwrap(), "2024-03-05");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(matches!(
            normalize_date_input("yesterday"),
            Err(TemporalError::UnrecognisedInput(_))
        ));
    }

    #[test]
    fn test_range_rejects_inverted() {
        let result = DateRange::new(Some(date(2024, 2, 1)), Some(date(2024, 1, 1)));
        assert!(matches!(result, Err(TemporalError::InvertedRange { .. })));
    }

    #[test]
    fn test_range_contains_inclusive() {
        let range = DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 1, 31))).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
        assert!(DateRange::unbounded().contains(date(1990, 6, 1)));
    }
}
