//! Storage failures
//!
//! Every SQLx error leaving the repository is classified here so the API layer
//! can tell a missing claim from a broken link or an unreachable database file.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The SQLite file could not be opened or the URL was malformed
    #[error("Cannot open claims database: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// A `parent_claim_id` pointing at no stored claim
    #[error("Unknown parent claim: {0}")]
    ForeignKeyViolation(String),

    /// CHECK or NOT NULL rejected a row
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Schema setup failed: {0}")]
    MigrationFailed(String),

    /// A stored row no longer maps onto the closed claim vocabularies
    #[error("Corrupt claim row: {0}")]
    SerializationError(String),

    #[error("No database connection available")]
    PoolExhausted,
}

impl DatabaseError {
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Claim", 42);
    /// assert_eq!(error.to_string(), "Claim 42 not found");
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} {} not found", entity, id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    /// True for rows the database refused to store as given
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_)
                | DatabaseError::ForeignKeyViolation(_)
                | DatabaseError::ConstraintViolation(_)
        )
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Classifies by SQLite extended result code, see <https://www.sqlite.org/rescode.html>
impl From<&sqlx::Error> for DatabaseError {
    fn from(error: &sqlx::Error) -> Self {
        let db_err = match error {
            sqlx::Error::RowNotFound => return DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut => return DatabaseError::PoolExhausted,
            sqlx::Error::Database(db_err) => db_err,
            other => return DatabaseError::QueryFailed(other.to_string()),
        };

        let message = db_err.message().to_string();
        match db_err.code().as_deref() {
            // UNIQUE, PRIMARYKEY
            Some("2067") | Some("1555") => DatabaseError::DuplicateEntry(message),
            Some("787") => DatabaseError::ForeignKeyViolation(message),
            // CHECK, NOTNULL
            Some("275") | Some("1299") => DatabaseError::ConstraintViolation(message),
            _ => DatabaseError::QueryFailed(message),
        }
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        DatabaseError::from(&error)
    }
}
