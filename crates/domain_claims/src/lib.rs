//! Claims Domain
//!
//! This crate holds the business rules of the claims desk: what a claim
//! looks like, which inputs are acceptable, and which claims may be linked
//! under which. It is pure and synchronous; persistence is reached only
//! through the injected [`linking::ClaimLookup`] capability.
//!
//! # Components
//!
//! ```text
//! validators (single-field checks)
//!     -> rules::ClaimRuleEngine (one ordered pass over a ClaimForm)
//! linking (Main / Linkable / Standalone roles, validate_link)
//! search (filter validation), summary (figures and statistics)
//! ```

pub mod claim;
pub mod form;
pub mod validators;
pub mod rules;
pub mod linking;
pub mod search;
pub mod summary;
pub mod error;

pub use claim::{Claim, ClaimStatus, ClaimType, Company, NewClaim};
pub use form::ClaimForm;
pub use rules::{validate, ClaimRuleEngine, DateOrderRule};
pub use linking::{classify, validate_link, ClaimLookup, ClaimRole};
pub use search::{ClaimFilter, ClaimSearch, MainClaimSearch};
pub use summary::{ClaimStatistics, FinancialSummary};
pub use error::{ClaimError, LinkPolicyViolation, UnknownValue, ValidationFailure};
