//! Domain layer: entities, repository traits, and the quota rules

pub mod credential;
pub mod error;
pub mod quota;
pub mod usage;

pub use credential::{Credential, CredentialToken};
pub use error::DomainError;
pub use quota::{AdmissionDecision, QuotaCheck};
pub use usage::{RequestOutcome, UsageRecord};
