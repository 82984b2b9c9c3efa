use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserProfilesError {
    #[error("Profile not found: {msisdn}")]
    NotFound { msisdn: String },

    #[error("Profile with msisdn '{msisdn}' already exists")]
    Conflict { msisdn: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl UserProfilesError {
    pub fn not_found(msisdn: impl Into<String>) -> Self {
        Self::NotFound {
            msisdn: msisdn.into(),
        }
    }

    pub fn conflict(msisdn: impl Into<String>) -> Self {
        Self::Conflict {
            msisdn: msisdn.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for UserProfilesError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            ProfileNotFound { msisdn } => Self::not_found(msisdn),
            MsisdnConflict { msisdn } => Self::conflict(msisdn),
            Validation { field, message } => Self::validation(format!("{field}: {message}")),
            Database { .. } => Self::internal(),
        }
    }
}
