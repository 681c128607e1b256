//! Parent/child claim linking policy
//!
//! Claim types split into three roles. Main claims (Cashless,
//! Reimbursement) can be parents; linkable claims (Pre-post, Hospital cash)
//! reference a main claim through `parent_claim_id`; everything else is
//! standalone. Because a parent must be a main type and main types never
//! carry a parent, links are at most one level deep and cannot form cycles.
//!
//! The storage layer only offers a bare foreign key. [`validate_link`] is
//! where the referential rules beyond it are enforced.

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::ClaimId;
use crate::claim::{Claim, ClaimType};
use crate::error::LinkPolicyViolation;

/// Role a claim type plays in linking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimRole {
    /// Can be referenced as a parent
    Main,
    /// Should reference a main claim; may briefly be unparented
    Linkable,
    /// Never parent nor child
    Standalone,
}

impl ClaimType {
    /// Classifies the type into its linking role
    pub fn role(&self) -> ClaimRole {
        match self {
            ClaimType::Cashless | ClaimType::Reimbursement => ClaimRole::Main,
            ClaimType::PrePost | ClaimType::HospitalCash => ClaimRole::Linkable,
            ClaimType::DayCare | ClaimType::HealthCheckup => ClaimRole::Standalone,
        }
    }

    /// Types that may act as a parent
    pub fn main_types() -> Vec<ClaimType> {
        Self::with_role(ClaimRole::Main)
    }

    /// Types that may be linked under a parent
    pub fn linkable_types() -> Vec<ClaimType> {
        Self::with_role(ClaimRole::Linkable)
    }

    fn with_role(role: ClaimRole) -> Vec<ClaimType> {
        Self::ALL.iter().copied().filter(|t| t.role() == role).collect()
    }
}

/// Classifies a raw claim type name; `None` for names outside the set
pub fn classify(claim_type: &str) -> Option<ClaimRole> {
    claim_type.parse::<ClaimType>().ok().map(|t| t.role())
}

/// Read-only point lookup of claims by id, supplied by persistence
pub trait ClaimLookup {
    fn find_claim(&self, id: ClaimId) -> Option<Claim>;
}

impl<F> ClaimLookup for F
where
    F: Fn(ClaimId) -> Option<Claim>,
{
    fn find_claim(&self, id: ClaimId) -> Option<Claim> {
        self(id)
    }
}

/// Fails unless the child type may carry a parent reference
///
/// Callers with an asynchronous store run this before fetching the parent,
/// then finish with [`check_resolved_parent`].
pub fn ensure_linkable(child_type: ClaimType) -> Result<(), LinkPolicyViolation> {
    if child_type.role() == ClaimRole::Linkable {
        Ok(())
    } else {
        Err(LinkPolicyViolation::NotLinkableType)
    }
}

/// Checks the parent a lookup resolved to
pub fn check_resolved_parent(parent: Option<&Claim>) -> Result<(), LinkPolicyViolation> {
    match parent {
        None => Err(LinkPolicyViolation::ParentNotFound),
        Some(parent) if parent.role() != ClaimRole::Main => Err(LinkPolicyViolation::ParentNotMainType),
        Some(_) => Ok(()),
    }
}

/// Validates a proposed link from a child of `child_type` to `parent_id`
///
/// The child type is checked before the lookup runs, so a non-linkable
/// child never touches storage.
pub fn validate_link<L>(
    child_type: ClaimType,
    parent_id: ClaimId,
    lookup: &L,
) -> Result<(), LinkPolicyViolation>
where
    L: ClaimLookup,
{
    ensure_linkable(child_type)?;
    let parent = lookup.find_claim(parent_id);
    let outcome = check_resolved_parent(parent.as_ref());
    debug!(%parent_id, child_type = %child_type, ?outcome, "Link validated");
    outcome
}
