//! Shared helpers for the claims desk test suites
//!
//! Fixtures and the `ClaimFormBuilder` produce valid intimations to start
//! from; `test_database` hands out a fresh in-memory SQLite store with the
//! schema applied, and `generators` feeds proptest.

pub mod assertions;
pub mod builders;
pub mod database;
pub mod fixtures;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use database::*;
pub use fixtures::*;
pub use generators::*;
