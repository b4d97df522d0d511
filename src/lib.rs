//! quotagate
//!
//! Admission-control gatekeeper: clients register to obtain a credential,
//! then issue requests against a daily quota that resets at midnight UTC.
//! Admitted requests are durably recorded so future decisions stay
//! consistent with past ones.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use config::StorageBackend;
use domain::credential::CredentialRepository;
use domain::usage::UsageLedger;
use infrastructure::credential::{
    CredentialService, InMemoryCredentialRepository, PostgresCredentialRepository, TokenGenerator,
};
use infrastructure::quota::QuotaEnforcer;
use infrastructure::storage;
use infrastructure::usage::{InMemoryUsageLedger, PostgresUsageLedger};

/// Wire up the application state for the configured storage backend
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let (credentials, ledger): (Arc<dyn CredentialRepository>, Arc<dyn UsageLedger>) =
        match config.storage.backend {
            StorageBackend::Memory => (
                Arc::new(InMemoryCredentialRepository::new()),
                Arc::new(InMemoryUsageLedger::new()),
            ),
            StorageBackend::Postgres => {
                let pg_config = storage::PostgresConfig::new(&config.storage.url)
                    .with_max_connections(config.storage.max_connections)
                    .with_acquire_timeout(config.storage.acquire_timeout_secs);

                let pool = storage::connect_pool(&pg_config).await?;
                storage::ensure_schema(&pool).await?;

                (
                    Arc::new(PostgresCredentialRepository::new(pool.clone())),
                    Arc::new(PostgresUsageLedger::new(pool)),
                )
            }
        };

    let operation_timeout = Duration::from_secs(config.storage.operation_timeout_secs);

    let credential_service = Arc::new(
        CredentialService::new(Arc::clone(&credentials), TokenGenerator::secret_key())
            .with_storage_timeout(operation_timeout),
    );

    let enforcer = Arc::new(
        QuotaEnforcer::new(credentials, ledger).with_storage_timeout(operation_timeout),
    );

    Ok(AppState::new(credential_service, enforcer))
}
