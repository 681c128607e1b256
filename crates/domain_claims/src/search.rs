//! Search filters over stored claims
//!
//! Query parameters arrive as raw text in a [`ClaimSearch`]. They are checked
//! with the same closed sets and date format as claim entry, then turned
//! into a typed [`ClaimFilter`] that persistence translates into a query.

use serde::{Deserialize, Serialize};

use core_kernel::{parse_canonical_date, DateRange};
use crate::claim::{Claim, ClaimStatus, ClaimType, Company};
use crate::error::ValidationFailure;
use crate::form::present;
use crate::validators::is_valid_date;

/// Raw search criteria; every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimSearch {
    pub customer_name: Option<String>,
    pub policy_number: Option<String>,
    pub company_name: Option<String>,
    pub claim_status: Option<String>,
    pub claim_type: Option<String>,
    pub entry_date_from: Option<String>,
    pub entry_date_to: Option<String>,
    pub admission_date_from: Option<String>,
    pub admission_date_to: Option<String>,
}

/// Raw criteria for picking a parent claim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MainClaimSearch {
    pub customer_name: Option<String>,
    pub policy_number: Option<String>,
    pub admission_date_from: Option<String>,
    pub admission_date_to: Option<String>,
}

/// Validated search criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimFilter {
    /// Case-insensitive substring
    pub customer_name: Option<String>,
    /// Case-insensitive substring
    pub policy_number: Option<String>,
    pub company: Option<Company>,
    pub status: Option<ClaimStatus>,
    pub claim_type: Option<ClaimType>,
    pub entry_dates: DateRange,
    pub admission_dates: DateRange,
}

impl ClaimSearch {
    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        [
            &self.customer_name,
            &self.policy_number,
            &self.company_name,
            &self.claim_status,
            &self.claim_type,
            &self.entry_date_from,
            &self.entry_date_to,
            &self.admission_date_from,
            &self.admission_date_to,
        ]
        .into_iter()
        .all(|v| present(v).is_none())
    }

    /// Returns every problem with the criteria, in a fixed order
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let date_fields = [
            (&self.entry_date_from, "Entry Date From"),
            (&self.entry_date_to, "Entry Date To"),
            (&self.admission_date_from, "Admission Date From"),
            (&self.admission_date_to, "Admission Date To"),
        ];
        for (value, label) in date_fields {
            if let Some(raw) = present(value) {
                if !is_valid_date(raw) {
                    errors.push(format!("{} must be in valid date format (YYYY-MM-DD)", label));
                }
            }
        }

        if inverted(&self.entry_date_from, &self.entry_date_to) {
            errors.push("Entry Date From cannot be after Entry Date To".to_string());
        }
        if inverted(&self.admission_date_from, &self.admission_date_to) {
            errors.push("Admission Date From cannot be after Admission Date To".to_string());
        }

        if present(&self.company_name).is_some_and(|v| v.parse::<Company>().is_err()) {
            errors.push("Invalid company name in filter".to_string());
        }
        if present(&self.claim_status).is_some_and(|v| v.parse::<ClaimStatus>().is_err()) {
            errors.push("Invalid claim status in filter".to_string());
        }
        if present(&self.claim_type).is_some_and(|v| v.parse::<ClaimType>().is_err()) {
            errors.push("Invalid claim type in filter".to_string());
        }

        errors
    }

    /// Validates and converts into a typed filter
    pub fn into_filter(self) -> Result<ClaimFilter, ValidationFailure> {
        if let Some(failure) = ValidationFailure::from_messages(self.validate()) {
            return Err(failure);
        }

        Ok(ClaimFilter {
            customer_name: present(&self.customer_name).map(str::to_string),
            policy_number: present(&self.policy_number).map(str::to_string),
            company: present(&self.company_name).and_then(|v| v.parse().ok()),
            status: present(&self.claim_status).and_then(|v| v.parse().ok()),
            claim_type: present(&self.claim_type).and_then(|v| v.parse().ok()),
            entry_dates: range(&self.entry_date_from, &self.entry_date_to),
            admission_dates: range(&self.admission_date_from, &self.admission_date_to),
        })
    }
}

impl MainClaimSearch {
    /// Validates and converts into a typed filter
    ///
    /// Restricting results to main claim types is left to the query.
    pub fn into_filter(self) -> Result<ClaimFilter, ValidationFailure> {
        ClaimSearch {
            customer_name: self.customer_name,
            policy_number: self.policy_number,
            admission_date_from: self.admission_date_from,
            admission_date_to: self.admission_date_to,
            ..Default::default()
        }
        .into_filter()
    }
}

impl ClaimFilter {
    /// Checks a claim against the criteria
    pub fn matches(&self, claim: &Claim) -> bool {
        contains_ignore_case(&claim.customer_name, self.customer_name.as_deref())
            && contains_ignore_case(&claim.policy_number, self.policy_number.as_deref())
            && self.company.map_or(true, |c| c == claim.company_name)
            && self.status.map_or(true, |s| s == claim.claim_status)
            && self.claim_type.map_or(true, |t| t == claim.claim_type)
            && self.entry_dates.contains(claim.entry_date)
            && self.admission_dates.contains(claim.admission_date)
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    needle.map_or(true, |n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

fn inverted(from: &Option<String>, to: &Option<String>) -> bool {
    let parse = |v: &Option<String>| present(v).and_then(|raw| parse_canonical_date(raw).ok());
    matches!((parse(from), parse(to)), (Some(from), Some(to)) if from > to)
}

/// Builds a range from already-validated bounds
fn range(from: &Option<String>, to: &Option<String>) -> DateRange {
    let parse = |v: &Option<String>| present(v).and_then(|raw| parse_canonical_date(raw).ok());
    DateRange {
        from: parse(from),
        to: parse(to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_search() {
        assert!(ClaimSearch::default().is_empty());
        let search = ClaimSearch {
            customer_name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(search.is_empty());
    }

    #[test]
    fn test_invalid_filters_reported_in_order() {
        let search = ClaimSearch {
            entry_date_to: Some("31/01/2024".to_string()),
            admission_date_from: Some("2024-02-01".to_string()),
            admission_date_to: Some("2024-01-01".to_string()),
            company_name: Some("ACME".to_string()),
            claim_type: Some("Dental".to_string()),
            ..Default::default()
        };
        assert_eq!(
            search.validate(),
            vec![
                "Entry Date To must be in valid date format (YYYY-MM-DD)",
                "Admission Date From cannot be after Admission Date To",
                "Invalid company name in filter",
                "Invalid claim type in filter",
            ]
        );
    }

    #[test]
    fn test_into_filter_types_values() {
        let filter = ClaimSearch {
            customer_name: Some(" singh ".to_string()),
            claim_status: Some("Settled".to_string()),
            entry_date_from: Some("2024-01-01".to_string()),
            ..Default::default()
        }
        .into_filter()
        .unwrap();

        assert_eq!(filter.customer_name.as_deref(), Some("singh"));
        assert_eq!(filter.status, Some(ClaimStatus::Settled));
        assert!(filter.entry_dates.from.is_some());
        assert!(filter.entry_dates.to.is_none());
    }

    #[test]
    fn test_main_claim_search_drops_unrelated_criteria() {
        let filter = MainClaimSearch {
            policy_number: Some("POL".to_string()),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.policy_number.as_deref(), Some("POL"));
        assert!(filter.claim_type.is_none());
    }
}
