//! PostgreSQL usage ledger implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::credential::CredentialToken;
use crate::domain::usage::{RequestOutcome, UsageLedger, UsageRecord, UsageRecordId};
use crate::domain::DomainError;

/// PostgreSQL implementation of UsageLedger
///
/// The `usage_records` table carries an index on (credential_token,
/// recorded_at) so the window count is an indexed range scan, and a serial
/// column breaks ties by insertion order when listing.
#[derive(Debug, Clone)]
pub struct PostgresUsageLedger {
    pool: PgPool,
}

impl PostgresUsageLedger {
    /// Create a new ledger with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsageLedger for PostgresUsageLedger {
    async fn append(&self, record: UsageRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO usage_records (id, credential_token, recorded_at, endpoint, outcome)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id().as_str())
        .bind(record.token.as_str())
        .bind(record.timestamp)
        .bind(&record.endpoint)
        .bind(record.outcome.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to append usage record: {}", e)))?;

        Ok(())
    }

    async fn count_in_window(
        &self,
        token: &CredentialToken,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM usage_records
            WHERE credential_token = $1
              AND recorded_at >= $2
              AND recorded_at < $3
            "#,
        )
        .bind(token.as_str())
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to count usage records: {}", e)))?;

        Ok(count as u64)
    }

    async fn list_for_credential(
        &self,
        token: &CredentialToken,
    ) -> Result<Vec<UsageRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, credential_token, recorded_at, endpoint, outcome
            FROM usage_records
            WHERE credential_token = $1
            ORDER BY recorded_at ASC, seq ASC
            "#,
        )
        .bind(token.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list usage records: {}", e)))?;

        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            records.push(row_to_record(&row)?);
        }

        Ok(records)
    }
}

fn row_to_record(row: &sqlx::postgres::PgRow) -> Result<UsageRecord, DomainError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| DomainError::storage(format!("Invalid id column: {}", e)))?;
    let token: String = row
        .try_get("credential_token")
        .map_err(|e| DomainError::storage(format!("Invalid credential_token column: {}", e)))?;
    let recorded_at: DateTime<Utc> = row
        .try_get("recorded_at")
        .map_err(|e| DomainError::storage(format!("Invalid recorded_at column: {}", e)))?;
    let endpoint: String = row
        .try_get("endpoint")
        .map_err(|e| DomainError::storage(format!("Invalid endpoint column: {}", e)))?;
    let outcome: String = row
        .try_get("outcome")
        .map_err(|e| DomainError::storage(format!("Invalid outcome column: {}", e)))?;

    let outcome: RequestOutcome = outcome.parse().map_err(DomainError::storage)?;

    Ok(UsageRecord::from_stored(
        UsageRecordId::from(id),
        CredentialToken::from(token),
        recorded_at,
        endpoint,
        outcome,
    ))
}
