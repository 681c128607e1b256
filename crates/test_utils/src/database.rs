//! Database Test Utilities
//!
//! Every [`TestDatabase`] is a private in-memory SQLite database, so tests
//! are isolated from each other without any external service.

use infra_db::{create_pool, initialize_schema, ClaimsRepository, DatabaseConfig, DatabaseError, DatabasePool};

/// A fresh in-memory database with the claims schema applied
pub struct TestDatabase {
    pub pool: DatabasePool,
}

impl TestDatabase {
    /// Opens a new empty database
    ///
    /// # Errors
    ///
    /// Returns an error if the pool or schema cannot be created
    pub async fn new() -> Result<Self, DatabaseError> {
        let pool = create_pool(DatabaseConfig::in_memory()).await?;
        initialize_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// A repository over this database
    pub fn repository(&self) -> ClaimsRepository {
        ClaimsRepository::new(self.pool.clone())
    }

    /// Removes every claim while keeping the schema
    pub async fn clear_data(&self) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM claims WHERE parent_claim_id IS NOT NULL")
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM claims").execute(&self.pool).await?;
        Ok(())
    }
}

/// Creates an isolated test database, panicking on failure
pub async fn test_database() -> TestDatabase {
    TestDatabase::new()
        .await
        .expect("Failed to create test database")
}

/// Helper macro for running database tests
#[macro_export]
macro_rules! db_test {
    ($name:ident, |$repo:ident| $body:block) => {
        #[tokio::test]
        async fn $name() {
            let db = $crate::database::test_database().await;
            let $repo = db.repository();
            $body
        }
    };
}
