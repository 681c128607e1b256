//! Claims table definition
//!
//! The schema is created idempotently at startup. Databases written before
//! the TPA column existed are upgraded in place.

use sqlx::Row;
use tracing::info;

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

const CREATE_CLAIMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS claims (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    entry_date TEXT NOT NULL,
    admission_date TEXT NOT NULL,
    customer_name TEXT NOT NULL,
    policy_number TEXT NOT NULL,
    hospital_name TEXT NOT NULL,
    company_name TEXT NOT NULL,
    claim_number TEXT,
    claim_status TEXT NOT NULL,
    claimed_amount REAL,
    approved_amount REAL,
    claim_type TEXT NOT NULL,
    remark TEXT,
    parent_claim_id INTEGER,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (parent_claim_id) REFERENCES claims (id)
);

CREATE INDEX IF NOT EXISTS idx_customer_name ON claims (customer_name);
CREATE INDEX IF NOT EXISTS idx_policy_number ON claims (policy_number);
CREATE INDEX IF NOT EXISTS idx_claim_status ON claims (claim_status);
CREATE INDEX IF NOT EXISTS idx_company_name ON claims (company_name);
CREATE INDEX IF NOT EXISTS idx_entry_date ON claims (entry_date);
CREATE INDEX IF NOT EXISTS idx_parent_claim_id ON claims (parent_claim_id);
"#;

/// Creates the claims table and indexes when missing
///
/// # Errors
///
/// Returns `DatabaseError::MigrationFailed` if any statement fails
pub async fn initialize_schema(pool: &DatabasePool) -> Result<(), DatabaseError> {
    sqlx::raw_sql(CREATE_CLAIMS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

    ensure_column(pool, "tpa_name", "TEXT").await?;

    info!("Database schema initialized");
    Ok(())
}

/// Adds a column to the claims table unless it already exists
async fn ensure_column(pool: &DatabasePool, column: &str, sql_type: &str) -> Result<(), DatabaseError> {
    let columns = sqlx::query("PRAGMA table_info(claims)")
        .fetch_all(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

    let present = columns
        .iter()
        .any(|row| row.try_get::<String, _>("name").is_ok_and(|name| name == column));
    if present {
        return Ok(());
    }

    info!(column, "Adding missing column to claims table");
    sqlx::query(&format!("ALTER TABLE claims ADD COLUMN {} {}", column, sql_type))
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    Ok(())
}
