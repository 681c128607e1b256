//! Financial summaries and portfolio statistics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::Amount;

/// Claimed, approved and outstanding figures for one claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub claimed_amount: Amount,
    pub approved_amount: Amount,
    /// Claimed minus approved
    pub pending_amount: Decimal,
}

impl FinancialSummary {
    /// Absent amounts count as zero
    pub fn new(claimed: Option<Amount>, approved: Option<Amount>) -> Self {
        let claimed = claimed.unwrap_or_default();
        let approved = approved.unwrap_or_default();
        Self {
            claimed_amount: claimed,
            approved_amount: approved,
            pending_amount: claimed.value() - approved.value(),
        }
    }
}

/// Counts and totals across all stored claims
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimStatistics {
    pub total_claims: u64,
    /// Keyed by status display text
    pub by_status: BTreeMap<String, u64>,
    /// Keyed by company display text
    pub by_company: BTreeMap<String, u64>,
    pub total_claimed: Amount,
    pub total_approved: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pending_amount() {
        let summary = FinancialSummary::new(
            Some(Amount::parse("1000").unwrap()),
            Some(Amount::parse("750.50").unwrap()),
        );
        assert_eq!(summary.pending_amount, dec!(249.50));
    }

    #[test]
    fn test_absent_amounts_are_zero() {
        let summary = FinancialSummary::new(None, None);
        assert!(summary.claimed_amount.is_zero());
        assert_eq!(summary.pending_amount, Decimal::ZERO);
    }
}
