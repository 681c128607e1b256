//! Claims repository implementation
//!
//! This module provides database access for claims: single-row writes,
//! filtered searches, parent/child lookups, cascade deletion and the
//! statistics shown on the dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;
use sqlx::{FromRow, QueryBuilder, Sqlite};
use tracing::{debug, info};

use core_kernel::{Amount, ClaimId};
use domain_claims::{Claim, ClaimFilter, ClaimStatistics, ClaimType, NewClaim};

use crate::error::DatabaseError;
use crate::pool::DatabasePool;

const CLAIM_COLUMNS: &str = "id, entry_date, admission_date, customer_name, policy_number, \
    hospital_name, company_name, claim_number, claim_status, claimed_amount, approved_amount, \
    claim_type, remark, parent_claim_id, tpa_name, created_at, updated_at";

const NEWEST_FIRST: &str = " ORDER BY entry_date DESC, id DESC";

/// Repository for managing claims data
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: DatabasePool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for health checks
    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Inserts a claim; storage assigns the id and both timestamps
    pub async fn create(&self, claim: &NewClaim) -> Result<Claim, DatabaseError> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO claims (entry_date, admission_date, customer_name, policy_number, \
             hospital_name, company_name, claim_number, claim_status, claimed_amount, \
             approved_amount, claim_type, remark, parent_claim_id, tpa_name, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
            CLAIM_COLUMNS
        );

        let row = bind_details(sqlx::query_as::<_, ClaimRow>(&sql), claim)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        info!(claim_id = row.id, claim_type = %row.claim_type, "Claim created");
        row.try_into()
    }

    /// Replaces every field except the id and refreshes `updated_at`
    ///
    /// # Errors
    ///
    /// `DatabaseError::NotFound` when no claim has this id
    pub async fn update(&self, id: ClaimId, claim: &NewClaim) -> Result<Claim, DatabaseError> {
        let sql = format!(
            "UPDATE claims SET entry_date = ?, admission_date = ?, customer_name = ?, \
             policy_number = ?, hospital_name = ?, company_name = ?, claim_number = ?, \
             claim_status = ?, claimed_amount = ?, approved_amount = ?, claim_type = ?, \
             remark = ?, parent_claim_id = ?, tpa_name = ?, updated_at = ? \
             WHERE id = ? RETURNING {}",
            CLAIM_COLUMNS
        );

        let row = bind_details(sqlx::query_as::<_, ClaimRow>(&sql), claim)
            .bind(Utc::now())
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| DatabaseError::not_found("Claim", id))?;

        info!(claim_id = row.id, "Claim updated");
        row.try_into()
    }

    /// Retrieves a claim by its identifier, if present
    pub async fn find_by_id(&self, id: ClaimId) -> Result<Option<Claim>, DatabaseError> {
        let sql = format!("SELECT {} FROM claims WHERE id = ?", CLAIM_COLUMNS);
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(claim_id = %id, found = row.is_some(), "Claim lookup");
        row.map(Claim::try_from).transpose()
    }

    /// Retrieves a claim by its identifier
    ///
    /// # Returns
    ///
    /// The claim or a NotFound error
    pub async fn get_by_id(&self, id: ClaimId) -> Result<Claim, DatabaseError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", id))
    }

    /// Claims matching the filter, newest entry first
    pub async fn search(&self, filter: &ClaimFilter) -> Result<Vec<Claim>, DatabaseError> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM claims WHERE 1 = 1", CLAIM_COLUMNS));
        push_filter(&mut query, filter);
        query.push(NEWEST_FIRST);

        let rows = query
            .build_query_as::<ClaimRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(count = rows.len(), "Claims searched");
        rows.into_iter().map(Claim::try_from).collect()
    }

    /// Every claim, newest entry first
    pub async fn list_all(&self) -> Result<Vec<Claim>, DatabaseError> {
        self.search(&ClaimFilter::default()).await
    }

    /// Claims referencing `parent_id` as their parent
    pub async fn linked_claims(&self, parent_id: ClaimId) -> Result<Vec<Claim>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM claims WHERE parent_claim_id = ?{}",
            CLAIM_COLUMNS, NEWEST_FIRST
        );
        let rows = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(parent_id.get())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(parent_id = %parent_id, count = rows.len(), "Linked claims fetched");
        rows.into_iter().map(Claim::try_from).collect()
    }

    /// Number of claims referencing `parent_id`
    pub async fn count_linked(&self, parent_id: ClaimId) -> Result<u64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM claims WHERE parent_claim_id = ?")
            .bind(parent_id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(count.max(0) as u64)
    }

    /// Claims of a main type that match the filter, offered as parents
    pub async fn main_claims(&self, filter: &ClaimFilter) -> Result<Vec<Claim>, DatabaseError> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM claims WHERE claim_type IN (", CLAIM_COLUMNS));
        let mut types = query.separated(", ");
        for claim_type in ClaimType::main_types() {
            types.push_bind(claim_type.as_str());
        }
        types.push_unseparated(")");
        push_filter(&mut query, filter);
        query.push(NEWEST_FIRST);

        let rows = query
            .build_query_as::<ClaimRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(count = rows.len(), "Main claims fetched");
        rows.into_iter().map(Claim::try_from).collect()
    }

    /// Deletes a claim together with every claim linked under it
    ///
    /// Children and parent are removed in one transaction, so a failure part
    /// way leaves nothing deleted.
    ///
    /// # Returns
    ///
    /// The number of linked claims removed alongside the parent
    pub async fn delete_cascade(&self, id: ClaimId) -> Result<u64, DatabaseError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM claims WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        if exists.is_none() {
            return Err(DatabaseError::not_found("Claim", id));
        }

        let children = sqlx::query("DELETE FROM claims WHERE parent_claim_id = ?")
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?
            .rows_affected();

        sqlx::query("DELETE FROM claims WHERE id = ?")
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        info!(claim_id = %id, linked_removed = children, "Claim deleted");
        Ok(children)
    }

    /// Counts and totals across all claims
    pub async fn statistics(&self) -> Result<ClaimStatistics, DatabaseError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM claims")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let by_status: Vec<(String, i64)> =
            sqlx::query_as("SELECT claim_status, COUNT(*) FROM claims GROUP BY claim_status")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        let by_company: Vec<(String, i64)> =
            sqlx::query_as("SELECT company_name, COUNT(*) FROM claims GROUP BY company_name")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        // Summed as decimals; SQL SUM over REAL would add binary noise
        let amounts: Vec<(Option<f64>, Option<f64>)> =
            sqlx::query_as("SELECT claimed_amount, approved_amount FROM claims")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        let mut total_claimed = Amount::ZERO;
        let mut total_approved = Amount::ZERO;
        for (claimed, approved) in amounts {
            total_claimed = total_claimed + stored_amount(claimed)?.unwrap_or_default();
            total_approved = total_approved + stored_amount(approved)?.unwrap_or_default();
        }

        let count = |n: i64| n.max(0) as u64;
        Ok(ClaimStatistics {
            total_claims: count(total),
            by_status: by_status.into_iter().map(|(k, n)| (k, count(n))).collect(),
            by_company: by_company.into_iter().map(|(k, n)| (k, count(n))).collect(),
            total_claimed,
            total_approved,
        })
    }
}

/// Database row for claim
#[derive(Debug, Clone, FromRow)]
pub struct ClaimRow {
    pub id: i64,
    pub entry_date: NaiveDate,
    pub admission_date: NaiveDate,
    pub customer_name: String,
    pub policy_number: String,
    pub hospital_name: String,
    pub company_name: String,
    pub claim_number: Option<String>,
    pub claim_status: String,
    pub claimed_amount: Option<f64>,
    pub approved_amount: Option<f64>,
    pub claim_type: String,
    pub remark: Option<String>,
    pub parent_claim_id: Option<i64>,
    pub tpa_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ClaimRow> for Claim {
    type Error = DatabaseError;

    fn try_from(row: ClaimRow) -> Result<Self, Self::Error> {
        let invalid = |e: &dyn std::fmt::Display| {
            DatabaseError::SerializationError(format!("claim {}: {}", row.id, e))
        };

        Ok(Claim {
            id: ClaimId::new(row.id),
            entry_date: row.entry_date,
            admission_date: row.admission_date,
            company_name: row.company_name.parse().map_err(|e| invalid(&e))?,
            claim_status: row.claim_status.parse().map_err(|e| invalid(&e))?,
            claim_type: row.claim_type.parse().map_err(|e| invalid(&e))?,
            claimed_amount: stored_amount(row.claimed_amount).map_err(|e| invalid(&e))?,
            approved_amount: stored_amount(row.approved_amount).map_err(|e| invalid(&e))?,
            customer_name: row.customer_name,
            policy_number: row.policy_number,
            hospital_name: row.hospital_name,
            claim_number: row.claim_number,
            remark: row.remark,
            parent_claim_id: row.parent_claim_id.map(ClaimId::new),
            tpa_name: row.tpa_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn stored_amount(value: Option<f64>) -> Result<Option<Amount>, DatabaseError> {
    value
        .map(Amount::from_f64)
        .transpose()
        .map_err(|e| DatabaseError::SerializationError(e.to_string()))
}

fn map_sqlx_error(error: sqlx::Error) -> DatabaseError {
    DatabaseError::from(&error)
}

/// Binds the fourteen stored claim fields in column order
fn bind_details<'q>(
    query: QueryAs<'q, Sqlite, ClaimRow, SqliteArguments<'q>>,
    claim: &NewClaim,
) -> QueryAs<'q, Sqlite, ClaimRow, SqliteArguments<'q>> {
    query
        .bind(claim.entry_date)
        .bind(claim.admission_date)
        .bind(claim.customer_name.clone())
        .bind(claim.policy_number.clone())
        .bind(claim.hospital_name.clone())
        .bind(claim.company_name.as_str())
        .bind(claim.claim_number.clone())
        .bind(claim.claim_status.as_str())
        .bind(claim.claimed_amount.map(|a| a.to_f64()))
        .bind(claim.approved_amount.map(|a| a.to_f64()))
        .bind(claim.claim_type.as_str())
        .bind(claim.remark.clone())
        .bind(claim.parent_claim_id.map(ClaimId::get))
        .bind(claim.tpa_name.clone())
}

/// Appends `AND` clauses for every criterion the filter sets
fn push_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: &ClaimFilter) {
    if let Some(name) = &filter.customer_name {
        query
            .push(" AND customer_name LIKE ")
            .push_bind(contains_pattern(name))
            .push(" ESCAPE '\\'");
    }
    if let Some(policy) = &filter.policy_number {
        query
            .push(" AND policy_number LIKE ")
            .push_bind(contains_pattern(policy))
            .push(" ESCAPE '\\'");
    }
    if let Some(company) = filter.company {
        query.push(" AND company_name = ").push_bind(company.as_str());
    }
    if let Some(status) = filter.status {
        query.push(" AND claim_status = ").push_bind(status.as_str());
    }
    if let Some(claim_type) = filter.claim_type {
        query.push(" AND claim_type = ").push_bind(claim_type.as_str());
    }
    if let Some(from) = filter.entry_dates.from {
        query.push(" AND entry_date >= ").push_bind(from);
    }
    if let Some(to) = filter.entry_dates.to {
        query.push(" AND entry_date <= ").push_bind(to);
    }
    if let Some(from) = filter.admission_dates.from {
        query.push(" AND admission_date >= ").push_bind(from);
    }
    if let Some(to) = filter.admission_dates.to {
        query.push(" AND admission_date <= ").push_bind(to);
    }
}

/// `%text%` with `\`, `%` and `_` escaped, so the text matches literally
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("POL-1"), "%POL-1%");
        assert_eq!(contains_pattern("A_1"), "%A\\_1%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
