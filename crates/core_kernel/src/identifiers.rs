//! Strongly-typed identifiers for domain entities
//!
//! Claims are keyed by an integer assigned by storage on insert. Wrapping it
//! in a newtype keeps a claim id from being confused with a count or an
//! amount at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Storage-assigned identifier of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(i64);

impl ClaimId {
    /// Wraps a raw storage identifier
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw storage identifier
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ClaimId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<ClaimId> for i64 {
    fn from(id: ClaimId) -> Self {
        id.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClaimId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_bare_integer() {
        assert_eq!(ClaimId::new(42).to_string(), "42");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let id: ClaimId = " 7 ".parse().unwrap();
        assert_eq!(id.get(), 7);
        assert!("seven".parse::<ClaimId>().is_err());
    }

    #[test]
    fn test_get_by_value_in_adapters() {
        let parent = Some(ClaimId::new(3));
        assert_eq!(parent.map(ClaimId::get), Some(3));
        assert_eq!(i64::from(ClaimId::new(5)), 5);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&ClaimId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: ClaimId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ClaimId::new(9));
    }
}
