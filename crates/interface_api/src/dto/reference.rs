//! Reference data for entry forms

use serde::{Deserialize, Serialize};

use core_kernel::CANONICAL_DATE_FORMAT;
use domain_claims::{ClaimRole, ClaimStatus, ClaimType, Company};

/// Closed value sets offered by form dropdowns
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceResponse {
    pub companies: Vec<String>,
    pub claim_statuses: Vec<String>,
    pub claim_types: Vec<ClaimTypeInfo>,
    /// Statuses that need a claim number
    pub processed_statuses: Vec<String>,
    pub date_format: String,
}

/// A claim type and whether it can be a parent or a child
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimTypeInfo {
    pub name: String,
    pub role: ClaimRole,
}

impl ReferenceResponse {
    pub fn current() -> Self {
        Self {
            companies: Company::ALL.iter().map(ToString::to_string).collect(),
            claim_statuses: ClaimStatus::ALL.iter().map(ToString::to_string).collect(),
            claim_types: ClaimType::ALL
                .iter()
                .map(|t| ClaimTypeInfo {
                    name: t.to_string(),
                    role: t.role(),
                })
                .collect(),
            processed_statuses: ClaimStatus::ALL
                .iter()
                .filter(|s| s.is_processed())
                .map(ToString::to_string)
                .collect(),
            date_format: CANONICAL_DATE_FORMAT.to_string(),
        }
    }
}
