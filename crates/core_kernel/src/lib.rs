//! Core Kernel - Foundational types for the claims desk
//!
//! This crate provides the value types used across all other crates:
//! - Claim identifiers assigned by storage
//! - Non-negative monetary amounts with precise decimal arithmetic
//! - Canonical calendar-date parsing and date ranges

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Amount, MoneyError};
pub use temporal::{
    DateRange, TemporalError, CANONICAL_DATE_FORMAT, parse_canonical_date,
    normalize_date_input, format_date, format_timestamp,
};
pub use identifiers::ClaimId;
