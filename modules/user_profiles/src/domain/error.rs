use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Profile not found: {msisdn}")]
    ProfileNotFound { msisdn: String },

    #[error("Profile with msisdn '{msisdn}' already exists")]
    MsisdnConflict { msisdn: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn profile_not_found(msisdn: impl Into<String>) -> Self {
        Self::ProfileNotFound {
            msisdn: msisdn.into(),
        }
    }

    pub fn msisdn_conflict(msisdn: impl Into<String>) -> Self {
        Self::MsisdnConflict {
            msisdn: msisdn.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<crate::domain::repo::StoreError> for DomainError {
    fn from(e: crate::domain::repo::StoreError) -> Self {
        use crate::domain::repo::StoreError;
        match e {
            StoreError::DuplicateMsisdn { msisdn } => Self::msisdn_conflict(msisdn),
            // keep the whole context chain for the server log
            StoreError::Other(err) => Self::database(format!("{err:#}")),
        }
    }
}
