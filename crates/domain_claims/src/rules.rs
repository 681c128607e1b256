//! Claim rule engine
//!
//! Runs every field and business rule over a [`ClaimForm`] in one pass and
//! returns all failures in a fixed order, so an entry form can show every
//! problem at once:
//!
//! 1. required fields
//! 2. date formats
//! 3. entry/admission ordering (only when both dates parsed)
//! 4. customer name, policy number, hospital name
//! 5. company, status and type membership
//! 6. amounts
//! 7. claim number for processed statuses
//! 8. parent link eligibility
//!
//! A blank required field is reported once as "X is required" and skipped
//! by every later check.

use chrono::NaiveDate;
use tracing::debug;

use core_kernel::{parse_canonical_date, Amount};
use crate::claim::{ClaimStatus, ClaimType, Company};
use crate::form::{present, ClaimForm};
use crate::linking::ClaimRole;
use crate::validators;

pub const ENTRY_DATE_FORMAT_MSG: &str = "Entry Date must be in valid date format (YYYY-MM-DD)";
pub const ADMISSION_DATE_FORMAT_MSG: &str = "Date of Admission must be in valid date format (YYYY-MM-DD)";
pub const ENTRY_BEFORE_ADMISSION_MSG: &str = "Entry Date should not be before Date of Admission";
pub const CUSTOMER_NAME_MSG: &str = "Customer Name should contain only letters, spaces, and common punctuation";
pub const POLICY_NUMBER_MSG: &str = "Policy Number should be alphanumeric and at least 3 characters long";
pub const HOSPITAL_NAME_MSG: &str = "Hospital Name should be at least 2 characters long";
pub const CLAIMED_AMOUNT_MSG: &str = "Claimed Amount must be a non-negative number";
pub const APPROVED_AMOUNT_MSG: &str = "Approved Amount must be a non-negative number";
pub const APPROVED_EXCEEDS_CLAIMED_MSG: &str = "Approved Amount cannot be greater than Claimed Amount";
pub const CLAIM_NUMBER_REQUIRED_MSG: &str = "Claim Number is required for submitted/processed claims";
pub const PARENT_LINK_TYPE_MSG: &str =
    "Parent claim linking is only allowed for Pre-post and Hospital cash claim types";
pub const SELF_LINK_MSG: &str = "A claim cannot be linked to itself";

/// The eight mandatory fields and the labels used in messages
const REQUIRED_FIELDS: [(RequiredField, &str); 8] = [
    (RequiredField::EntryDate, "Entry Date"),
    (RequiredField::AdmissionDate, "Date of Admission"),
    (RequiredField::CustomerName, "Customer Name"),
    (RequiredField::PolicyNumber, "Policy Number"),
    (RequiredField::HospitalName, "Hospital Name"),
    (RequiredField::CompanyName, "Company Name"),
    (RequiredField::ClaimStatus, "Claim Status"),
    (RequiredField::ClaimType, "Claim Type"),
];

#[derive(Debug, Clone, Copy)]
enum RequiredField {
    EntryDate,
    AdmissionDate,
    CustomerName,
    PolicyNumber,
    HospitalName,
    CompanyName,
    ClaimStatus,
    ClaimType,
}

impl RequiredField {
    fn value<'a>(&self, form: &'a ClaimForm) -> &'a Option<String> {
        match self {
            RequiredField::EntryDate => &form.entry_date,
            RequiredField::AdmissionDate => &form.admission_date,
            RequiredField::CustomerName => &form.customer_name,
            RequiredField::PolicyNumber => &form.policy_number,
            RequiredField::HospitalName => &form.hospital_name,
            RequiredField::CompanyName => &form.company_name,
            RequiredField::ClaimStatus => &form.claim_status,
            RequiredField::ClaimType => &form.claim_type,
        }
    }
}

/// How entry date relates to admission date
///
/// Offices differ on whether a claim may be logged before the patient is
/// admitted (pre-authorisation), so the ordering rule is swappable on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateOrderRule {
    /// Entry must be on or after admission
    #[default]
    EntryOnOrAfterAdmission,
    /// No ordering constraint
    Unchecked,
}

impl DateOrderRule {
    fn check(&self, entry: NaiveDate, admission: NaiveDate) -> Option<&'static str> {
        match self {
            DateOrderRule::EntryOnOrAfterAdmission if entry < admission => Some(ENTRY_BEFORE_ADMISSION_MSG),
            _ => None,
        }
    }
}

/// Validates claim forms
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimRuleEngine {
    date_order: DateOrderRule,
}

impl ClaimRuleEngine {
    /// Creates an engine with the standard rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entry/admission ordering rule
    pub fn with_date_order(mut self, rule: DateOrderRule) -> Self {
        self.date_order = rule;
        self
    }

    /// Checks a form against every rule
    ///
    /// Never fails: an empty list means the form is acceptable.
    pub fn validate(&self, form: &ClaimForm) -> Vec<String> {
        let mut errors = Vec::new();

        Self::check_required(form, &mut errors);
        let (entry, admission) = Self::check_date_formats(form, &mut errors);
        if let (Some(entry), Some(admission)) = (entry, admission) {
            errors.extend(self.date_order.check(entry, admission).map(str::to_string));
        }
        Self::check_text_fields(form, &mut errors);
        Self::check_memberships(form, &mut errors);
        Self::check_amounts(form, &mut errors);
        Self::check_claim_number(form, &mut errors);
        Self::check_parent_link(form, &mut errors);

        debug!(error_count = errors.len(), claim_id = ?form.id, "Claim form validated");
        errors
    }

    fn check_required(form: &ClaimForm, errors: &mut Vec<String>) {
        for (field, label) in REQUIRED_FIELDS {
            if present(field.value(form)).is_none() {
                errors.push(format!("{} is required", label));
            }
        }
    }

    fn check_date_formats(
        form: &ClaimForm,
        errors: &mut Vec<String>,
    ) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let mut parse = |raw: &Option<String>, message: &str| {
            let value = present(raw)?;
            if validators::is_valid_date(value) {
                parse_canonical_date(value).ok()
            } else {
                errors.push(message.to_string());
                None
            }
        };

        let entry = parse(&form.entry_date, ENTRY_DATE_FORMAT_MSG);
        let admission = parse(&form.admission_date, ADMISSION_DATE_FORMAT_MSG);
        (entry, admission)
    }

    fn check_text_fields(form: &ClaimForm, errors: &mut Vec<String>) {
        if let Some(name) = present(&form.customer_name) {
            if !validators::is_valid_customer_name(name) {
                errors.push(CUSTOMER_NAME_MSG.to_string());
            }
        }
        if let Some(policy) = present(&form.policy_number) {
            if !validators::is_valid_policy_number(policy) {
                errors.push(POLICY_NUMBER_MSG.to_string());
            }
        }
        if let Some(hospital) = present(&form.hospital_name) {
            if !validators::is_valid_hospital_name(hospital) {
                errors.push(HOSPITAL_NAME_MSG.to_string());
            }
        }
    }

    fn check_memberships(form: &ClaimForm, errors: &mut Vec<String>) {
        if let Some(company) = present(&form.company_name) {
            if company.parse::<Company>().is_err() {
                errors.push(membership_message("Company Name", &Company::sorted_names()));
            }
        }
        if let Some(status) = present(&form.claim_status) {
            if status.parse::<ClaimStatus>().is_err() {
                errors.push(membership_message("Claim Status", &ClaimStatus::sorted_names()));
            }
        }
        if let Some(claim_type) = present(&form.claim_type) {
            if claim_type.parse::<ClaimType>().is_err() {
                errors.push(membership_message("Claim Type", &ClaimType::sorted_names()));
            }
        }
    }

    fn check_amounts(form: &ClaimForm, errors: &mut Vec<String>) {
        let claimed = present(&form.claimed_amount);
        let approved = present(&form.approved_amount);

        if !validators::is_valid_amount(claimed) {
            errors.push(CLAIMED_AMOUNT_MSG.to_string());
        }
        if !validators::is_valid_amount(approved) {
            errors.push(APPROVED_AMOUNT_MSG.to_string());
        }

        let parsed = |raw: Option<&str>| raw.and_then(|v| Amount::parse(v).ok());
        if let (Some(claimed), Some(approved)) = (parsed(claimed), parsed(approved)) {
            if approved > claimed {
                errors.push(APPROVED_EXCEEDS_CLAIMED_MSG.to_string());
            }
        }
    }

    fn check_claim_number(form: &ClaimForm, errors: &mut Vec<String>) {
        let processed = present(&form.claim_status)
            .and_then(|s| s.parse::<ClaimStatus>().ok())
            .is_some_and(|s| s.is_processed());

        if processed && present(&form.claim_number).is_none() {
            errors.push(CLAIM_NUMBER_REQUIRED_MSG.to_string());
        }
    }

    fn check_parent_link(form: &ClaimForm, errors: &mut Vec<String>) {
        let Some(parent_id) = form.parent_claim_id else {
            return;
        };

        let linkable = present(&form.claim_type)
            .and_then(|t| t.parse::<ClaimType>().ok())
            .is_some_and(|t| t.role() == ClaimRole::Linkable);
        if !linkable {
            errors.push(PARENT_LINK_TYPE_MSG.to_string());
        }

        if form.id == Some(parent_id) {
            errors.push(SELF_LINK_MSG.to_string());
        }
    }
}

fn membership_message(label: &str, names: &[&str]) -> String {
    format!("{} must be one of: {}", label, names.join(", "))
}

/// Validates a form with the standard rule set
pub fn validate(form: &ClaimForm) -> Vec<String> {
    ClaimRuleEngine::new().validate(form)
}
