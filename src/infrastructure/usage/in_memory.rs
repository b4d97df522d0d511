//! In-memory usage ledger implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::credential::CredentialToken;
use crate::domain::usage::{UsageLedger, UsageRecord};
use crate::domain::DomainError;

/// In-memory implementation of UsageLedger
///
/// Records are held per token in insertion order. Appends take the write
/// lock, so concurrent appends for the same token cannot lose updates, and a
/// count started after an append completes always observes it.
#[derive(Debug)]
pub struct InMemoryUsageLedger {
    records: Arc<RwLock<HashMap<String, Vec<UsageRecord>>>>,
}

impl InMemoryUsageLedger {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUsageLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsageLedger for InMemoryUsageLedger {
    async fn append(&self, record: UsageRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;

        records
            .entry(record.token.as_str().to_string())
            .or_default()
            .push(record);

        Ok(())
    }

    async fn count_in_window(
        &self,
        token: &CredentialToken,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let records = self.records.read().await;

        let count = records
            .get(token.as_str())
            .map(|entries| {
                entries
                    .iter()
                    .filter(|r| start <= r.timestamp && r.timestamp < end)
                    .count()
            })
            .unwrap_or(0);

        Ok(count as u64)
    }

    async fn list_for_credential(
        &self,
        token: &CredentialToken,
    ) -> Result<Vec<UsageRecord>, DomainError> {
        let records = self.records.read().await;

        let mut entries = records.get(token.as_str()).cloned().unwrap_or_default();

        // Stable sort keeps insertion order for identical timestamps.
        entries.sort_by_key(|r| r.timestamp);

        Ok(entries)
    }
}
