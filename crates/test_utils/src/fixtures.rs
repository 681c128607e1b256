//! Pre-built Test Fixtures
//!
//! Ready-to-use claim data. The base form is the accepted intimation used
//! throughout the suite: an HDFC cashless claim entered five days after
//! admission.

use core_kernel::ClaimId;
use domain_claims::{ClaimForm, ClaimRuleEngine, NewClaim};

use crate::builders::ClaimFormBuilder;

/// Fixture for claim forms
pub struct FormFixtures;

impl FormFixtures {
    /// An intimation that passes every rule
    pub fn valid_intimation() -> ClaimForm {
        ClaimFormBuilder::new().build()
    }

    /// A settled claim with a claim number and amounts
    pub fn settled_with_amounts() -> ClaimForm {
        ClaimFormBuilder::new()
            .claim_status("Settled")
            .claim_number("CLM-2024-0001")
            .claimed_amount("50000")
            .approved_amount("45000.50")
            .build()
    }

    /// A form with every field left empty
    pub fn empty() -> ClaimForm {
        ClaimForm::default()
    }
}

/// Fixture for typed claims ready to persist
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// A cashless claim that can act as a parent
    pub fn main_claim() -> NewClaim {
        Self::typed(ClaimFormBuilder::new())
    }

    /// A reimbursement claim for another customer
    pub fn other_main_claim() -> NewClaim {
        Self::typed(
            ClaimFormBuilder::new()
                .customer_name("Priya Nair")
                .policy_number("POL-777")
                .company_name("NIVA")
                .claim_type("Reimbursement")
                .entry_date("2024-03-02")
                .admission_date("2024-02-27")
                .claimed_amount("120000")
                .approved_amount("100000"),
        )
    }

    /// A pre-post claim linked under `parent`
    pub fn linked_claim(parent: ClaimId) -> NewClaim {
        Self::typed(
            ClaimFormBuilder::new()
                .claim_type("Pre-post")
                .entry_date("2024-01-20")
                .claimed_amount("2500")
                .parent_claim_id(parent),
        )
    }

    /// A day-care claim, which never takes part in linking
    pub fn standalone_claim() -> NewClaim {
        Self::typed(
            ClaimFormBuilder::new()
                .customer_name("R. Mehta")
                .policy_number("POL_900")
                .company_name("TATA")
                .claim_type("Day care")
                .claim_status("Submitted")
                .claim_number("CLM-900")
                .entry_date("2024-02-10")
                .admission_date("2024-02-10"),
        )
    }

    fn typed(builder: ClaimFormBuilder) -> NewClaim {
        builder
            .build()
            .into_new_claim(&ClaimRuleEngine::new())
            .expect("fixture form must validate")
    }
}
