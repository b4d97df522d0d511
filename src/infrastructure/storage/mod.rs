//! PostgreSQL pool construction and schema setup

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::domain::DomainError;

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Bound on acquiring a connection, in seconds
    pub acquire_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/quotagate".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_acquire_timeout(mut self, secs: u64) -> Self {
        self.acquire_timeout_secs = secs;
        self
    }
}

/// Connect a pool with bounded acquire timeout
pub async fn connect_pool(config: &PostgresConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
}

/// Create the schema if it does not exist
///
/// Credentials are keyed by token with a secondary uniqueness constraint on
/// owner; usage records are indexed on (credential_token, recorded_at) so
/// window counts are range scans. The serial `seq` column breaks listing
/// ties by insertion order.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS credentials (
            token TEXT PRIMARY KEY,
            owner TEXT NOT NULL UNIQUE,
            daily_limit BIGINT NOT NULL CHECK (daily_limit >= 1),
            issued_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DomainError::storage(format!("Failed to create credentials table: {}", e)))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS usage_records (
            id TEXT PRIMARY KEY,
            seq BIGSERIAL,
            credential_token TEXT NOT NULL REFERENCES credentials (token),
            recorded_at TIMESTAMPTZ NOT NULL,
            endpoint TEXT NOT NULL,
            outcome TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DomainError::storage(format!("Failed to create usage_records table: {}", e)))?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_usage_records_token_time
        ON usage_records (credential_token, recorded_at)
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DomainError::storage(format!("Failed to create usage index: {}", e)))?;

    Ok(())
}
