//! Credential entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque credential token issued at registration
///
/// High-entropy and unguessable; generated once, never rotated in-core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialToken(String);

impl CredentialToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CredentialToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CredentialToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for CredentialToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered credential: token, owner identity, and configured daily quota
///
/// Immutable once issued. There is no update or delete path; rotation and
/// revocation are out of scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// The issued token (unique for its lifetime)
    token: CredentialToken,
    /// Owner identity; maps to at most one live credential
    owner: String,
    /// Maximum admitted requests per UTC day (>= 1)
    daily_limit: u32,
    /// Issuance timestamp
    issued_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(
        token: CredentialToken,
        owner: impl Into<String>,
        daily_limit: u32,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            owner: owner.into(),
            daily_limit,
            issued_at,
        }
    }

    pub fn token(&self) -> &CredentialToken {
        &self.token
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn daily_limit(&self) -> u32 {
        self.daily_limit
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}
