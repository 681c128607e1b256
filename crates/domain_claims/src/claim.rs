//! Claim record and its closed value sets

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{Amount, ClaimId};
use crate::error::UnknownValue;
use crate::linking::ClaimRole;
use crate::summary::FinancialSummary;

/// Declares a closed enumeration whose variants travel as display text
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in presentation order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human-readable name used on forms and in storage
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Display names sorted lexicographically
            pub fn sorted_names() -> Vec<&'static str> {
                let mut names: Vec<&'static str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                names.sort_unstable();
                names
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == needle)
                    .ok_or_else(|| UnknownValue::new($kind, needle))
            }
        }
    };
}

closed_set! {
    /// Insurer the claim is lodged with
    Company, "company" {
        Niva => "NIVA",
        Hdfc => "HDFC",
        Tata => "TATA",
        Care => "CARE",
        NewIndia => "NEW INDIA",
        National => "NATIONAL",
        United => "UNITED",
        Oriental => "ORIENTAL",
        FutureGenerali => "FUTURE GENERALI",
    }
}

closed_set! {
    /// Where the claim stands with the insurer
    ClaimStatus, "claim status" {
        /// Insurer notified, nothing filed yet
        Intimation => "Intimation",
        Submitted => "Submitted",
        Approved => "Approved",
        Declined => "Declined",
        Reconsideration => "Reconsideration",
        Settled => "Settled",
        /// Insurer asked for more documents
        AdditionalRequirement => "Additional requirement",
        /// Escalated to the insurance ombudsman
        Ombudsman => "Ombudsman",
    }
}

closed_set! {
    /// Kind of benefit being claimed
    ClaimType, "claim type" {
        Cashless => "Cashless",
        Reimbursement => "Reimbursement",
        /// Pre- and post-hospitalisation expenses
        PrePost => "Pre-post",
        DayCare => "Day care",
        HospitalCash => "Hospital cash",
        HealthCheckup => "Health check-up",
    }
}

impl ClaimStatus {
    /// The claim has left pure intimation and must carry a claim number
    pub fn is_processed(&self) -> bool {
        matches!(
            self,
            ClaimStatus::Submitted | ClaimStatus::Approved | ClaimStatus::Declined | ClaimStatus::Settled
        )
    }

    /// Still being worked
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ClaimStatus::Intimation
                | ClaimStatus::Submitted
                | ClaimStatus::AdditionalRequirement
                | ClaimStatus::Reconsideration
        )
    }

    /// The insurer has reached an outcome
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            ClaimStatus::Approved | ClaimStatus::Declined | ClaimStatus::Settled | ClaimStatus::Ombudsman
        )
    }

    /// Waiting on the office to act
    pub fn needs_follow_up(&self) -> bool {
        matches!(self, ClaimStatus::AdditionalRequirement | ClaimStatus::Reconsideration)
    }
}

/// Validated claim details, ready to be persisted
///
/// Produced by [`crate::form::ClaimForm::into_new_claim`]; carries no id or
/// timestamps because storage assigns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
    pub entry_date: NaiveDate,
    pub admission_date: NaiveDate,
    pub customer_name: String,
    pub policy_number: String,
    pub hospital_name: String,
    pub company_name: Company,
    pub claim_number: Option<String>,
    pub claim_status: ClaimStatus,
    pub claim_type: ClaimType,
    pub claimed_amount: Option<Amount>,
    pub approved_amount: Option<Amount>,
    pub remark: Option<String>,
    pub parent_claim_id: Option<ClaimId>,
    /// Third-party administrator handling the claim
    pub tpa_name: Option<String>,
}

/// A persisted insurance claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: ClaimId,
    pub entry_date: NaiveDate,
    pub admission_date: NaiveDate,
    pub customer_name: String,
    pub policy_number: String,
    pub hospital_name: String,
    pub company_name: Company,
    pub claim_number: Option<String>,
    pub claim_status: ClaimStatus,
    pub claim_type: ClaimType,
    pub claimed_amount: Option<Amount>,
    pub approved_amount: Option<Amount>,
    pub remark: Option<String>,
    pub parent_claim_id: Option<ClaimId>,
    pub tpa_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Attaches storage-assigned identity and timestamps to validated details
    pub fn from_new(
        id: ClaimId,
        details: NewClaim,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            entry_date: details.entry_date,
            admission_date: details.admission_date,
            customer_name: details.customer_name,
            policy_number: details.policy_number,
            hospital_name: details.hospital_name,
            company_name: details.company_name,
            claim_number: details.claim_number,
            claim_status: details.claim_status,
            claim_type: details.claim_type,
            claimed_amount: details.claimed_amount,
            approved_amount: details.approved_amount,
            remark: details.remark,
            parent_claim_id: details.parent_claim_id,
            tpa_name: details.tpa_name,
            created_at,
            updated_at,
        }
    }

    /// Role of this claim in parent/child linking
    pub fn role(&self) -> ClaimRole {
        self.claim_type.role()
    }

    /// Can other claims be linked under this one
    pub fn is_main_claim(&self) -> bool {
        self.role() == ClaimRole::Main
    }

    /// Can this claim reference a main claim
    pub fn can_be_linked(&self) -> bool {
        self.role() == ClaimRole::Linkable
    }

    /// Label used when offering this claim as a parent
    pub fn display_name(&self) -> String {
        let mut display = format!("{} ({})", self.customer_name, self.policy_number);
        if let Some(number) = self.claim_number.as_deref().filter(|n| !n.trim().is_empty()) {
            display.push_str(" - ");
            display.push_str(number);
        }
        display
    }

    /// Claimed, approved and outstanding figures, absent amounts counted as zero
    pub fn financial_summary(&self) -> FinancialSummary {
        FinancialSummary::new(self.claimed_amount, self.approved_amount)
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Claim({}): {} - {} - {}",
            self.id, self.customer_name, self.claim_type, self.claim_status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_round_trip_through_display_text() {
        for status in ClaimStatus::ALL {
            assert_eq!(status.as_str().parse::<ClaimStatus>().unwrap(), *status);
        }
        for company in Company::ALL {
            assert_eq!(company.to_string().parse::<Company>().unwrap(), *company);
        }
    }

    #[test]
    fn test_from_str_is_exact_after_trim() {
        assert_eq!(" Pre-post ".parse::<ClaimType>().unwrap(), ClaimType::PrePost);
        assert!("pre-post".parse::<ClaimType>().is_err());
        assert!("Unknown".parse::<Company>().is_err());
    }

    #[test]
    fn test_serde_uses_display_text() {
        let json = serde_json::to_string(&ClaimStatus::AdditionalRequirement).unwrap();
        assert_eq!(json, "\"Additional requirement\"");
        let back: Company = serde_json::from_str("\"FUTURE GENERALI\"").unwrap();
        assert_eq!(back, Company::FutureGenerali);
    }

    #[test]
    fn test_sorted_names() {
        assert_eq!(
            ClaimType::sorted_names(),
            vec!["Cashless", "Day care", "Health check-up", "Hospital cash", "Pre-post", "Reimbursement"]
        );
    }

    #[test]
    fn test_status_groups() {
        let processed: Vec<_> = ClaimStatus::ALL.iter().filter(|s| s.is_processed()).collect();
        assert_eq!(processed.len(), 4);
        assert!(ClaimStatus::Ombudsman.is_final());
        assert!(!ClaimStatus::Ombudsman.is_processed());
        assert!(ClaimStatus::Reconsideration.needs_follow_up());
        assert!(ClaimStatus::Intimation.is_active());
    }
}
