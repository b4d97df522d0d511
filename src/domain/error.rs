use thiserror::Error;

/// Core domain errors
///
/// The enforcement core never logs, retries, or swallows an error; every
/// failure propagates to the boundary layer as one of these typed outcomes.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Owner '{owner}' already has a credential")]
    DuplicateOwner { owner: String },

    #[error("Unknown credential")]
    UnknownCredential,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Storage timeout: {message}")]
    Timeout { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn duplicate_owner(owner: impl Into<String>) -> Self {
        Self::DuplicateOwner {
            owner: owner.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
