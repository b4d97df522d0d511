//! Credential registration and lookup service

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;

use super::TokenGenerator;
use crate::domain::credential::{
    validate_daily_limit, validate_owner, Credential, CredentialRepository, CredentialToken,
};
use crate::domain::DomainError;

/// Default bound on any single repository call made by the service
const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Service for issuing and resolving credentials
#[derive(Debug)]
pub struct CredentialService {
    repository: Arc<dyn CredentialRepository>,
    generator: TokenGenerator,
    storage_timeout: Duration,
}

impl CredentialService {
    pub fn new(repository: Arc<dyn CredentialRepository>, generator: TokenGenerator) -> Self {
        Self {
            repository,
            generator,
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    /// Set the bound on individual repository calls
    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    /// Register a new owner and issue a credential
    ///
    /// Fails with `DomainError::DuplicateOwner` if the owner already holds a
    /// live credential; there is no upsert path. `now` is threaded in by the
    /// caller so issuance is deterministic under test.
    pub async fn register(
        &self,
        owner: &str,
        daily_limit: u32,
        now: DateTime<Utc>,
    ) -> Result<Credential, DomainError> {
        validate_owner(owner).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_daily_limit(daily_limit).map_err(|e| DomainError::validation(e.to_string()))?;

        let token = self.generator.generate();
        let credential = Credential::new(token, owner, daily_limit, now);
        let credential = self
            .bounded("create credential", self.repository.create(credential))
            .await?;

        info!(owner = %credential.owner(), daily_limit, "Issued credential");

        Ok(credential)
    }

    /// Resolve a token to its credential
    ///
    /// Pure lookup; fails with `DomainError::UnknownCredential` if the token
    /// was never issued.
    pub async fn resolve(&self, token: &CredentialToken) -> Result<Credential, DomainError> {
        self.bounded("resolve credential", self.repository.find_by_token(token))
            .await?
            .ok_or(DomainError::UnknownCredential)
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = Result<T, DomainError>>,
    ) -> Result<T, DomainError> {
        tokio::time::timeout(self.storage_timeout, fut)
            .await
            .map_err(|_| {
                DomainError::timeout(format!(
                    "{} did not complete within {:?}",
                    operation, self.storage_timeout
                ))
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::credential::InMemoryCredentialRepository;

    fn service() -> CredentialService {
        CredentialService::new(
            Arc::new(InMemoryCredentialRepository::new()),
            TokenGenerator::secret_key(),
        )
    }

    #[tokio::test]
    async fn test_register_issues_unique_tokens() {
        let service = service();

        let first = service.register("a@b.com", 100, Utc::now()).await.unwrap();
        let second = service.register("c@d.com", 100, Utc::now()).await.unwrap();

        assert_ne!(first.token(), second.token());
        assert!(first.token().as_str().starts_with("sk_"));
    }

    #[tokio::test]
    async fn test_register_duplicate_owner() {
        let service = service();

        service.register("a@b.com", 3, Utc::now()).await.unwrap();

        let result = service.register("a@b.com", 500, Utc::now()).await;
        assert!(matches!(result, Err(DomainError::DuplicateOwner { .. })));
    }

    #[tokio::test]
    async fn test_register_rejects_zero_limit() {
        let service = service();

        let result = service.register("a@b.com", 0, Utc::now()).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_register_rejects_empty_owner() {
        let service = service();

        let result = service.register("", 100, Utc::now()).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_resolve_round_trip() {
        let service = service();

        let issued = service.register("a@b.com", 100, Utc::now()).await.unwrap();
        let resolved = service.resolve(issued.token()).await.unwrap();

        assert_eq!(resolved.owner(), "a@b.com");
        assert_eq!(resolved.daily_limit(), 100);
    }

    #[tokio::test]
    async fn test_resolve_unknown_token() {
        let service = service();

        let result = service.resolve(&CredentialToken::from("sk_missing")).await;
        assert!(matches!(result, Err(DomainError::UnknownCredential)));
    }

    #[tokio::test]
    async fn test_stalled_repository_times_out() {
        #[derive(Debug)]
        struct StalledRepository;

        #[async_trait::async_trait]
        impl CredentialRepository for StalledRepository {
            async fn create(&self, _credential: Credential) -> Result<Credential, DomainError> {
                std::future::pending().await
            }

            async fn find_by_token(
                &self,
                _token: &CredentialToken,
            ) -> Result<Option<Credential>, DomainError> {
                std::future::pending().await
            }
        }

        let service =
            CredentialService::new(Arc::new(StalledRepository), TokenGenerator::secret_key())
                .with_storage_timeout(Duration::from_millis(10));

        let result = service.register("a@b.com", 100, Utc::now()).await;
        assert!(matches!(result, Err(DomainError::Timeout { .. })));

        let result = service.resolve(&CredentialToken::from("sk_any")).await;
        assert!(matches!(result, Err(DomainError::Timeout { .. })));
    }
}
