//! Usage ledger trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

use super::UsageRecord;
use crate::domain::credential::CredentialToken;
use crate::domain::DomainError;

/// Append-only record of admitted requests
///
/// Appends for the same token must not lose updates under concurrency, and a
/// count must reflect every append that completed before the count started
/// (read-your-writes within a single process; cross-process guarantees are
/// whatever the backing store provides).
#[async_trait]
pub trait UsageLedger: Send + Sync + Debug {
    /// Durably append one record
    async fn append(&self, record: UsageRecord) -> Result<(), DomainError>;

    /// Count records for `token` with `start <= timestamp < end`
    async fn count_in_window(
        &self,
        token: &CredentialToken,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, DomainError>;

    /// All records for `token`, timestamp ascending (insertion order for ties)
    ///
    /// Serves the activity view; slightly stale reads are acceptable here.
    async fn list_for_credential(
        &self,
        token: &CredentialToken,
    ) -> Result<Vec<UsageRecord>, DomainError>;
}
