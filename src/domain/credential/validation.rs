//! Registration input validation

use thiserror::Error;

/// Errors that can occur when validating registration input
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistrationValidationError {
    #[error("Owner identity cannot be empty")]
    EmptyOwner,

    #[error("Owner identity exceeds maximum length of {0} characters")]
    OwnerTooLong(usize),

    #[error("Owner identity contains whitespace")]
    OwnerContainsWhitespace,

    #[error("Daily limit must be at least 1")]
    ZeroLimit,
}

const MAX_OWNER_LENGTH: usize = 254;

/// Validate an owner identity
///
/// Rules:
/// - Cannot be empty
/// - Maximum 254 characters (longest valid email address)
/// - No whitespace
pub fn validate_owner(owner: &str) -> Result<(), RegistrationValidationError> {
    if owner.is_empty() {
        return Err(RegistrationValidationError::EmptyOwner);
    }

    if owner.len() > MAX_OWNER_LENGTH {
        return Err(RegistrationValidationError::OwnerTooLong(MAX_OWNER_LENGTH));
    }

    if owner.chars().any(|c| c.is_whitespace()) {
        return Err(RegistrationValidationError::OwnerContainsWhitespace);
    }

    Ok(())
}

/// Validate a daily limit
///
/// The limit is the maximum number of admitted requests per window, so a
/// credential with limit 0 could never be used.
pub fn validate_daily_limit(limit: u32) -> Result<(), RegistrationValidationError> {
    if limit == 0 {
        return Err(RegistrationValidationError::ZeroLimit);
    }

    Ok(())
}
