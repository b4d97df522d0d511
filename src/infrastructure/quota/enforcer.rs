//! Quota enforcement engine
//!
//! Decides, for a credential and a clock reading, whether a request is
//! admitted, and records admitted requests so future decisions stay
//! consistent with past ones.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::domain::credential::{CredentialRepository, CredentialToken};
use crate::domain::quota::{utc_day_window, QuotaCheck};
use crate::domain::usage::{RequestOutcome, UsageLedger, UsageRecord};
use crate::domain::DomainError;

/// Default bound on any single storage call made by the enforcer
const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// The quota-enforcement engine
///
/// The count-decide-append sequence is the system's one critical section and
/// is serialized per credential: two concurrent requests for the same token
/// must not both observe `used < limit` and both be admitted. Requests for
/// different credentials never block each other.
#[derive(Debug)]
pub struct QuotaEnforcer {
    credentials: Arc<dyn CredentialRepository>,
    ledger: Arc<dyn UsageLedger>,
    /// Per-token locks guarding the check-then-append sequence. Entries are
    /// never pruned; the map grows by one small allocation per distinct token
    /// over the process lifetime.
    locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
    storage_timeout: Duration,
}

impl QuotaEnforcer {
    pub fn new(credentials: Arc<dyn CredentialRepository>, ledger: Arc<dyn UsageLedger>) -> Self {
        Self {
            credentials,
            ledger,
            locks: RwLock::new(HashMap::new()),
            storage_timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    /// Set the bound on individual storage calls
    pub fn with_storage_timeout(mut self, timeout: Duration) -> Self {
        self.storage_timeout = timeout;
        self
    }

    /// Run one enforcement pass for `token` at instant `now`
    ///
    /// Resolves the credential, counts this window's usage, renders the
    /// decision, and on allow appends the usage record before the per-token
    /// lock is released. Every storage call here is bounded; a timeout
    /// surfaces as `DomainError::Timeout` and is never converted into an
    /// allow or a deny.
    pub async fn check(
        &self,
        token: &CredentialToken,
        now: DateTime<Utc>,
        endpoint: &str,
    ) -> Result<QuotaCheck, DomainError> {
        let credential = self
            .bounded("resolve credential", self.credentials.find_by_token(token))
            .await?
            .ok_or(DomainError::UnknownCredential)?;

        let lock = self.lock_for(token).await;
        let _guard = lock.lock().await;

        let window = utc_day_window(now);
        let used = self
            .bounded(
                "count usage in window",
                self.ledger.count_in_window(token, window.start, window.end),
            )
            .await?;

        let check = QuotaCheck::decide(used, credential.daily_limit());

        if check.decision.is_allow() {
            let record =
                UsageRecord::new(token.clone(), now, endpoint, RequestOutcome::Allowed);

            self.bounded("append usage record", self.ledger.append(record))
                .await?;
        }

        debug!(
            owner = %credential.owner(),
            used = check.used,
            limit = check.limit,
            decision = %check.decision,
            "Rendered admission decision"
        );

        Ok(check)
    }

    /// The activity view: all records for the credential, oldest first
    ///
    /// Read-only path; takes no lock, so a result stale by an in-flight
    /// admission is acceptable.
    pub async fn activity(
        &self,
        token: &CredentialToken,
    ) -> Result<Vec<UsageRecord>, DomainError> {
        if self
            .bounded("resolve credential", self.credentials.find_by_token(token))
            .await?
            .is_none()
        {
            return Err(DomainError::UnknownCredential);
        }

        self.bounded("list usage records", self.ledger.list_for_credential(token))
            .await
    }

    async fn lock_for(&self, token: &CredentialToken) -> Arc<Mutex<()>> {
        {
            let locks = self.locks.read().await;

            if let Some(lock) = locks.get(token.as_str()) {
                return Arc::clone(lock);
            }
        }

        let mut locks = self.locks.write().await;

        Arc::clone(
            locks
                .entry(token.as_str().to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
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
