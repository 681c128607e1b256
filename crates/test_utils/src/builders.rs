//! Test Data Builders
//!
//! Provides a builder for claim forms with sensible defaults. Tests set only
//! the fields they care about; everything else stays valid.

use core_kernel::ClaimId;
use domain_claims::ClaimForm;

/// Builder for raw claim forms
///
/// Defaults to an accepted HDFC cashless intimation.
#[derive(Debug, Clone)]
pub struct ClaimFormBuilder {
    form: ClaimForm,
}

impl Default for ClaimFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! text_setters {
    ($($field:ident),* $(,)?) => {
        $(
            pub fn $field(mut self, value: impl Into<String>) -> Self {
                self.form.$field = Some(value.into());
                self
            }
        )*
    };
}

impl ClaimFormBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            form: ClaimForm {
                entry_date: Some("2024-01-10".to_string()),
                admission_date: Some("2024-01-05".to_string()),
                customer_name: Some("A. Singh".to_string()),
                policy_number: Some("POL-123".to_string()),
                hospital_name: Some("City Hospital".to_string()),
                company_name: Some("HDFC".to_string()),
                claim_status: Some("Intimation".to_string()),
                claim_type: Some("Cashless".to_string()),
                ..ClaimForm::default()
            },
        }
    }

    text_setters!(
        entry_date,
        admission_date,
        customer_name,
        policy_number,
        hospital_name,
        company_name,
        claim_number,
        claim_status,
        claim_type,
        claimed_amount,
        approved_amount,
        remark,
        tpa_name,
    );

    /// Sets the id of the claim being edited
    pub fn id(mut self, id: ClaimId) -> Self {
        self.form.id = Some(id);
        self
    }

    pub fn parent_claim_id(mut self, parent: ClaimId) -> Self {
        self.form.parent_claim_id = Some(parent);
        self
    }

    /// Clears a field by its display label, e.g. "Hospital Name"
    pub fn without(mut self, label: &str) -> Self {
        let form = &mut self.form;
        let slot = match label {
            "Entry Date" => &mut form.entry_date,
            "Date of Admission" => &mut form.admission_date,
            "Customer Name" => &mut form.customer_name,
            "Policy Number" => &mut form.policy_number,
            "Hospital Name" => &mut form.hospital_name,
            "Company Name" => &mut form.company_name,
            "Claim Status" => &mut form.claim_status,
            "Claim Type" => &mut form.claim_type,
            "Claim Number" => &mut form.claim_number,
            "Claimed Amount" => &mut form.claimed_amount,
            "Approved Amount" => &mut form.approved_amount,
            other => panic!("unknown field label: {}", other),
        };
        *slot = None;
        self
    }

    pub fn build(self) -> ClaimForm {
        self.form
    }
}
