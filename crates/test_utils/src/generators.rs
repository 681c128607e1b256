//! Property-Based Test Generators
//!
//! Provides proptest strategies for claim data. Strategies named `valid_*`
//! only produce values the rule engine accepts.

use chrono::{Duration, NaiveDate};
use core_kernel::{format_date, Amount};
use domain_claims::{ClaimForm, ClaimStatus, ClaimType, Company};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::builders::ClaimFormBuilder;

/// Statuses that require a claim number
pub const PROCESSED_STATUSES: [ClaimStatus; 4] = [
    ClaimStatus::Submitted,
    ClaimStatus::Approved,
    ClaimStatus::Declined,
    ClaimStatus::Settled,
];

/// Labels of the eight required fields
pub const REQUIRED_LABELS: [&str; 8] = [
    "Entry Date",
    "Date of Admission",
    "Customer Name",
    "Policy Number",
    "Hospital Name",
    "Company Name",
    "Claim Status",
    "Claim Type",
];

pub fn company_strategy() -> impl Strategy<Value = Company> {
    proptest::sample::select(Company::ALL)
}

pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    proptest::sample::select(ClaimStatus::ALL)
}

pub fn claim_type_strategy() -> impl Strategy<Value = ClaimType> {
    proptest::sample::select(ClaimType::ALL)
}

/// Strategy for one of the four processed statuses
pub fn processed_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    proptest::sample::select(PROCESSED_STATUSES.to_vec())
}

/// Strategy for statuses where a claim number stays optional
pub fn unprocessed_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    let rest: Vec<ClaimStatus> = ClaimStatus::ALL
        .iter()
        .copied()
        .filter(|s| !PROCESSED_STATUSES.contains(s))
        .collect();
    proptest::sample::select(rest)
}

/// Strategy for dates between 2020 and the end of 2026
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..2557).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date") + Duration::days(offset)
    })
}

/// Strategy for amounts with up to two decimals
pub fn amount_strategy() -> impl Strategy<Value = Amount> {
    (0i64..100_000_000i64).prop_map(|cents| Amount::new(Decimal::new(cents, 2)).expect("non-negative"))
}

/// Strategy for names the customer-name rule accepts
pub fn valid_customer_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,10}( [A-Z]\\.)?( [A-Z][a-z'-]{1,10})?"
}

/// Strategy for policy numbers the policy rule accepts
pub fn valid_policy_number_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{2,4}[-_][0-9]{3,8}"
}

/// Strategy for accepted forms with random values in every required field
pub fn valid_form_strategy() -> impl Strategy<Value = ClaimForm> {
    (
        date_strategy(),
        0i64..60,
        valid_customer_name_strategy(),
        valid_policy_number_strategy(),
        company_strategy(),
        unprocessed_status_strategy(),
        claim_type_strategy(),
    )
        .prop_map(|(admission, delay, name, policy, company, status, claim_type)| {
            ClaimFormBuilder::new()
                .admission_date(format_date(admission))
                .entry_date(format_date(admission + Duration::days(delay)))
                .customer_name(name)
                .policy_number(policy)
                .company_name(company.as_str())
                .claim_status(status.as_str())
                .claim_type(claim_type.as_str())
                .build()
        })
}
