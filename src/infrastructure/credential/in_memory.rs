//! In-memory credential repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::credential::{Credential, CredentialRepository, CredentialToken};
use crate::domain::DomainError;

/// In-memory implementation of CredentialRepository
///
/// Both uniqueness checks and the insert happen under a single write lock, so
/// concurrent registrations for the same owner cannot both succeed.
#[derive(Debug)]
pub struct InMemoryCredentialRepository {
    credentials: Arc<RwLock<HashMap<String, Credential>>>,
    owner_index: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self {
            credentials: Arc::new(RwLock::new(HashMap::new())),
            owner_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryCredentialRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn create(&self, credential: Credential) -> Result<Credential, DomainError> {
        let mut credentials = self.credentials.write().await;
        let mut owner_index = self.owner_index.write().await;

        let token = credential.token().as_str().to_string();
        let owner = credential.owner().to_string();

        if owner_index.contains_key(&owner) {
            return Err(DomainError::duplicate_owner(owner));
        }

        if credentials.contains_key(&token) {
            return Err(DomainError::internal(
                "Generated token collided with an existing credential",
            ));
        }

        credentials.insert(token.clone(), credential.clone());
        owner_index.insert(owner, token);

        Ok(credential)
    }

    async fn find_by_token(
        &self,
        token: &CredentialToken,
    ) -> Result<Option<Credential>, DomainError> {
        let credentials = self.credentials.read().await;
        Ok(credentials.get(token.as_str()).cloned())
    }
}
