//! Claims domain errors
//!
//! Both rejection kinds are recoverable: the caller shows them to the person
//! entering the claim so the input can be corrected.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A value outside one of the closed sets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValue {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Every problem found in one validation pass, in rule order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    messages: Vec<String>,
}

impl ValidationFailure {
    /// Wraps the messages, or returns `None` when there are none
    pub fn from_messages(messages: Vec<String>) -> Option<Self> {
        if messages.is_empty() {
            None
        } else {
            Some(Self { messages })
        }
    }

    /// A failure carrying one message
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {}", self.messages.join("; "))
    }
}

impl std::error::Error for ValidationFailure {}

/// Why a proposed parent link was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum LinkPolicyViolation {
    #[error("Only Pre-post and Hospital cash claims can be linked to a main claim")]
    NotLinkableType,

    #[error("Parent claim does not exist")]
    ParentNotFound,

    #[error("Parent claim must be a Cashless or Reimbursement claim")]
    ParentNotMainType,
}

impl LinkPolicyViolation {
    /// Stable reason code for API consumers
    pub fn code(&self) -> &'static str {
        match self {
            LinkPolicyViolation::NotLinkableType => "NotLinkableType",
            LinkPolicyViolation::ParentNotFound => "ParentNotFound",
            LinkPolicyViolation::ParentNotMainType => "ParentNotMainType",
        }
    }
}

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("Link policy violation: {0}")]
    LinkPolicy(#[from] LinkPolicyViolation),

    #[error("Claim {claim_id} still has {linked} linked claim(s) and must stay a main claim type")]
    HasLinkedClaims { claim_id: String, linked: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_messages_are_not_a_failure() {
        assert!(ValidationFailure::from_messages(vec![]).is_none());
    }

    #[test]
    fn test_failure_display_joins_messages() {
        let failure = ValidationFailure::from_messages(vec![
            "Entry Date is required".to_string(),
            "Claim Type is required".to_string(),
        ])
        .unwrap();
        assert_eq!(
            failure.to_string(),
            "Validation failed: Entry Date is required; Claim Type is required"
        );
        assert_eq!(failure.messages().len(), 2);
    }

    #[test]
    fn test_link_violation_codes() {
        assert_eq!(LinkPolicyViolation::ParentNotFound.code(), "ParentNotFound");
        let err: ClaimError = LinkPolicyViolation::NotLinkableType.into();
        assert!(matches!(err, ClaimError::LinkPolicy(LinkPolicyViolation::NotLinkableType)));
    }
}
