//! Repository implementations
//!
//! Repositories encapsulate SQL queries and map between database rows and
//! domain types. Multi-statement writes run inside a transaction.

pub mod claims;

pub use claims::{ClaimRow, ClaimsRepository};
