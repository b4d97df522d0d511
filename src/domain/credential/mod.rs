//! Credential domain: issued tokens, their owners, and configured quotas

mod entity;
mod repository;
mod validation;

pub use entity::{Credential, CredentialToken};
pub use repository::CredentialRepository;
pub use validation::{validate_daily_limit, validate_owner, RegistrationValidationError};
