//! Credential repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::{Credential, CredentialToken};
use crate::domain::DomainError;

/// Repository owning the mapping from issued token to credential
///
/// Implementations must enforce uniqueness of both the token and the owner
/// identity atomically with respect to the insert; a lost uniqueness check
/// would let one owner hold two live credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync + Debug {
    /// Persist a freshly issued credential
    ///
    /// Fails with `DomainError::DuplicateOwner` if the owner identity already
    /// has a live credential, and with `DomainError::Internal` on a token
    /// collision (which generation makes astronomically unlikely).
    async fn create(&self, credential: Credential) -> Result<Credential, DomainError>;

    /// Look up a credential by token. Pure read, no side effects.
    async fn find_by_token(
        &self,
        token: &CredentialToken,
    ) -> Result<Option<Credential>, DomainError>;
}
