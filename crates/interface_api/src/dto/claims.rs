//! Claims DTOs

use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimRole, FinancialSummary};

/// A stored claim with its derived figures
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    #[serde(flatten)]
    pub claim: Claim,
    pub role: ClaimRole,
    pub display_name: String,
    pub financial_summary: FinancialSummary,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            role: claim.role(),
            display_name: claim.display_name(),
            financial_summary: claim.financial_summary(),
            claim,
        }
    }
}

/// Entry in the parent-claim picker
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainClaimOption {
    pub id: ClaimId,
    pub display_name: String,
    pub customer_name: String,
    pub policy_number: String,
    pub claim_number: Option<String>,
    pub claim_type: String,
    pub entry_date: String,
    pub admission_date: String,
}

impl From<&Claim> for MainClaimOption {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.id,
            display_name: claim.display_name(),
            customer_name: claim.customer_name.clone(),
            policy_number: claim.policy_number.clone(),
            claim_number: claim.claim_number.clone(),
            claim_type: claim.claim_type.to_string(),
            entry_date: core_kernel::format_date(claim.entry_date),
            admission_date: core_kernel::format_date(claim.admission_date),
        }
    }
}

/// Outcome of a dry-run validation
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl From<Vec<String>> for ValidationResponse {
    fn from(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted_id: ClaimId,
    pub linked_removed: u64,
}
