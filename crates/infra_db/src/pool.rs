//! SQLite pool setup
//!
//! Foreign keys are off by default in SQLite; every connection opened here
//! turns them on so `parent_claim_id` is enforced by storage as well.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

pub type DatabasePool = SqlitePool;

/// URL of a private in-memory database
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Where the claims database lives and how many connections may share it
///
/// ```rust
/// use infra_db::DatabaseConfig;
///
/// let config = DatabaseConfig::new("sqlite://insurance_claims.db").max_connections(8);
/// assert_eq!(config.max_connections, 8);
/// assert!(config.create_if_missing);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// `None` keeps connections open for the life of the pool
    pub idle_timeout: Option<Duration>,
    pub create_if_missing: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            create_if_missing: true,
        }
    }

    /// One connection that is never recycled.
    ///
    /// Each connection to `sqlite::memory:` sees its own empty database.
    pub fn in_memory() -> Self {
        Self {
            max_connections: 1,
            idle_timeout: None,
            ..Self::new(IN_MEMORY_URL)
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("sqlite://insurance_claims.db")
    }
}

/// Opens the pool, failing with `DatabaseError::ConnectionFailed` on a bad URL
/// or an unreachable file.
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!(url = %config.url, max_connections = config.max_connections, "Opening claims database");

    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?
        .create_if_missing(config.create_if_missing)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout);
    if config.idle_timeout.is_none() {
        pool_options = pool_options.max_lifetime(None);
    }

    pool_options
        .connect_with(options)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
}
