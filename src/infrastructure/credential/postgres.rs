//! PostgreSQL credential repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::credential::{Credential, CredentialRepository, CredentialToken};
use crate::domain::DomainError;

/// PostgreSQL implementation of CredentialRepository
///
/// Uniqueness is enforced by the schema: PRIMARY KEY on token and a UNIQUE
/// constraint on owner, so concurrent registrations race in the database
/// rather than in application code.
#[derive(Debug, Clone)]
pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn create(&self, credential: Credential) -> Result<Credential, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO credentials (token, owner, daily_limit, issued_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(credential.token().as_str())
        .bind(credential.owner())
        .bind(i64::from(credential.daily_limit()))
        .bind(credential.issued_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                if msg.contains("owner") {
                    DomainError::duplicate_owner(credential.owner())
                } else {
                    DomainError::internal(
                        "Generated token collided with an existing credential",
                    )
                }
            } else {
                DomainError::storage(format!("Failed to create credential: {}", e))
            }
        })?;

        Ok(credential)
    }

    async fn find_by_token(
        &self,
        token: &CredentialToken,
    ) -> Result<Option<Credential>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT token, owner, daily_limit, issued_at
            FROM credentials
            WHERE token = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to find credential: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_credential(&row)?)),
            None => Ok(None),
        }
    }
}

fn row_to_credential(row: &sqlx::postgres::PgRow) -> Result<Credential, DomainError> {
    let token: String = row
        .try_get("token")
        .map_err(|e| DomainError::storage(format!("Invalid token column: {}", e)))?;
    let owner: String = row
        .try_get("owner")
        .map_err(|e| DomainError::storage(format!("Invalid owner column: {}", e)))?;
    let daily_limit: i64 = row
        .try_get("daily_limit")
        .map_err(|e| DomainError::storage(format!("Invalid daily_limit column: {}", e)))?;
    let issued_at: DateTime<Utc> = row
        .try_get("issued_at")
        .map_err(|e| DomainError::storage(format!("Invalid issued_at column: {}", e)))?;

    let daily_limit = u32::try_from(daily_limit)
        .map_err(|_| DomainError::storage("Stored daily_limit out of range"))?;

    Ok(Credential::new(
        CredentialToken::from(token),
        owner,
        daily_limit,
        issued_at,
    ))
}
