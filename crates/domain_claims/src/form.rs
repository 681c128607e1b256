//! Raw claim input as it arrives from an entry form or API request
//!
//! Nothing here is trusted: every field is optional text until the rule
//! engine has passed it. [`ClaimForm::into_new_claim`] is the only way to
//! turn a form into a [`NewClaim`].

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use core_kernel::{format_date, normalize_date_input, parse_canonical_date, Amount, ClaimId};
use crate::claim::{Claim, NewClaim};
use crate::error::ValidationFailure;
use crate::rules::ClaimRuleEngine;

/// Field map consumed by [`ClaimRuleEngine::validate`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimForm {
    /// Set when editing an existing claim
    pub id: Option<ClaimId>,
    pub entry_date: Option<String>,
    pub admission_date: Option<String>,
    pub customer_name: Option<String>,
    pub policy_number: Option<String>,
    pub hospital_name: Option<String>,
    pub company_name: Option<String>,
    pub claim_number: Option<String>,
    pub claim_status: Option<String>,
    pub claim_type: Option<String>,
    #[serde(deserialize_with = "deserialize_amount_input")]
    pub claimed_amount: Option<String>,
    #[serde(deserialize_with = "deserialize_amount_input")]
    pub approved_amount: Option<String>,
    pub remark: Option<String>,
    pub parent_claim_id: Option<ClaimId>,
    pub tpa_name: Option<String>,
}

/// Trimmed text, or `None` when absent or blank
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Amounts may be sent as JSON numbers or as text
fn deserialize_amount_input<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<RawAmount>::deserialize(deserializer)?.map(|raw| match raw {
        RawAmount::Text(text) => text,
        RawAmount::Number(number) => number.to_string(),
    }))
}

impl ClaimForm {
    /// Pre-fills a form from a stored claim, for editing
    pub fn from_claim(claim: &Claim) -> Self {
        Self {
            id: Some(claim.id),
            entry_date: Some(format_date(claim.entry_date)),
            admission_date: Some(format_date(claim.admission_date)),
            customer_name: Some(claim.customer_name.clone()),
            policy_number: Some(claim.policy_number.clone()),
            hospital_name: Some(claim.hospital_name.clone()),
            company_name: Some(claim.company_name.to_string()),
            claim_number: claim.claim_number.clone(),
            claim_status: Some(claim.claim_status.to_string()),
            claim_type: Some(claim.claim_type.to_string()),
            claimed_amount: claim.claimed_amount.map(|a| a.value().to_string()),
            approved_amount: claim.approved_amount.map(|a| a.value().to_string()),
            remark: claim.remark.clone(),
            parent_claim_id: claim.parent_claim_id,
            tpa_name: claim.tpa_name.clone(),
        }
    }

    /// Rewrites recognisable regional date input into `YYYY-MM-DD`
    ///
    /// Unrecognised input is left untouched so validation reports it.
    pub fn normalize_dates(&mut self) {
        for field in [&mut self.entry_date, &mut self.admission_date] {
            if let Some(raw) = field.as_mut() {
                if let Ok(canonical) = normalize_date_input(raw) {
                    *raw = canonical;
                }
            }
        }
    }

    /// Validates the form and converts it into typed claim details
    ///
    /// # Errors
    ///
    /// Returns every message produced by the rule engine when the form is
    /// not acceptable.
    pub fn into_new_claim(self, engine: &ClaimRuleEngine) -> Result<NewClaim, ValidationFailure> {
        if let Some(failure) = ValidationFailure::from_messages(engine.validate(&self)) {
            return Err(failure);
        }

        Ok(NewClaim {
            entry_date: required_date(&self.entry_date, "Entry Date")?,
            admission_date: required_date(&self.admission_date, "Date of Admission")?,
            customer_name: required_text(&self.customer_name, "Customer Name")?,
            policy_number: required_text(&self.policy_number, "Policy Number")?,
            hospital_name: required_text(&self.hospital_name, "Hospital Name")?,
            company_name: required_parsed(&self.company_name, "Company Name")?,
            claim_number: optional_text(&self.claim_number),
            claim_status: required_parsed(&self.claim_status, "Claim Status")?,
            claim_type: required_parsed(&self.claim_type, "Claim Type")?,
            claimed_amount: optional_amount(&self.claimed_amount, "Claimed Amount")?,
            approved_amount: optional_amount(&self.approved_amount, "Approved Amount")?,
            remark: optional_text(&self.remark),
            parent_claim_id: self.parent_claim_id,
            tpa_name: optional_text(&self.tpa_name),
        })
    }
}

fn invalid(label: &str) -> ValidationFailure {
    ValidationFailure::single(format!("{} is invalid", label))
}

fn required_text(value: &Option<String>, label: &str) -> Result<String, ValidationFailure> {
    present(value).map(str::to_string).ok_or_else(|| invalid(label))
}

fn optional_text(value: &Option<String>) -> Option<String> {
    present(value).map(str::to_string)
}

fn required_date(value: &Option<String>, label: &str) -> Result<chrono::NaiveDate, ValidationFailure> {
    present(value)
        .and_then(|v| parse_canonical_date(v).ok())
        .ok_or_else(|| invalid(label))
}

fn required_parsed<T: FromStr>(value: &Option<String>, label: &str) -> Result<T, ValidationFailure> {
    present(value)
        .and_then(|v| v.parse::<T>().ok())
        .ok_or_else(|| invalid(label))
}

fn optional_amount(value: &Option<String>, label: &str) -> Result<Option<Amount>, ValidationFailure> {
    present(value)
        .map(|v| Amount::parse(v).map_err(|_| invalid(label)))
        .transpose()
}
