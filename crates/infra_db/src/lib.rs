//! Infrastructure Database Layer
//!
//! This crate provides persistence for the claims desk on SQLite using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern, providing data access that hides
//! the database details from the domain layer. Claims live in one flat table
//! keyed by an auto-assigned integer id, with a nullable self-referencing
//! `parent_claim_id` column. Enumerated values are stored as their display
//! text and amounts as `REAL`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, initialize_schema, ClaimsRepository, DatabaseConfig};
//!
//! let pool = create_pool(DatabaseConfig::new("sqlite://insurance_claims.db")).await?;
//! initialize_schema(&pool).await?;
//! let repo = ClaimsRepository::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod schema;
pub mod repositories;

pub use pool::{create_pool, DatabaseConfig, DatabasePool, IN_MEMORY_URL};
pub use error::DatabaseError;
pub use schema::initialize_schema;
pub use repositories::ClaimsRepository;
