//! Usage record entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::credential::CredentialToken;

/// Unique identifier for a usage record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageRecordId(String);

impl UsageRecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new unique ID
    pub fn generate() -> Self {
        Self(format!("usage-{}", uuid::Uuid::new_v4()))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UsageRecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UsageRecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for UsageRecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome recorded for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// The request was admitted
    Allowed,
}

impl RequestOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Allowed => "allowed",
        }
    }
}

impl std::fmt::Display for RequestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allowed" => Ok(Self::Allowed),
            other => Err(format!("unknown request outcome '{}'", other)),
        }
    }
}

/// One durable entry representing a single admitted request
///
/// Append-only: once written a record is never mutated or deleted. Window
/// filtering happens at query time; history is not garbage-collected here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Unique ID
    id: UsageRecordId,
    /// Token of the credential that made the request
    pub token: CredentialToken,
    /// When the request was admitted (UTC)
    pub timestamp: DateTime<Utc>,
    /// Endpoint the request accessed
    pub endpoint: String,
    /// Recorded outcome
    pub outcome: RequestOutcome,
}

impl UsageRecord {
    pub fn new(
        token: CredentialToken,
        timestamp: DateTime<Utc>,
        endpoint: impl Into<String>,
        outcome: RequestOutcome,
    ) -> Self {
        Self {
            id: UsageRecordId::generate(),
            token,
            timestamp,
            endpoint: endpoint.into(),
            outcome,
        }
    }

    /// Rehydrate a record read back from storage, keeping its original ID
    pub fn from_stored(
        id: UsageRecordId,
        token: CredentialToken,
        timestamp: DateTime<Utc>,
        endpoint: impl Into<String>,
        outcome: RequestOutcome,
    ) -> Self {
        Self {
            id,
            token,
            timestamp,
            endpoint: endpoint.into(),
            outcome,
        }
    }

    /// Get the record ID
    pub fn id(&self) -> &UsageRecordId {
        &self.id
    }
}
