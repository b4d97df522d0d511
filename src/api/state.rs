//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::credential::CredentialService;
use crate::infrastructure::quota::QuotaEnforcer;

/// Application state containing the shared services
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
    pub enforcer: Arc<QuotaEnforcer>,
}

impl AppState {
    pub fn new(credentials: Arc<CredentialService>, enforcer: Arc<QuotaEnforcer>) -> Self {
        Self {
            credentials,
            enforcer,
        }
    }
}
