use async_trait::async_trait;
use thiserror::Error;

use crate::contract::model::{ProfileData, UserProfile};

/// Failures a profile store can report.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Write rejected by the unique `msisdn` index.
    #[error("msisdn '{msisdn}' violates the unique index")]
    DuplicateMsisdn { msisdn: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
///
/// An empty `msisdn` is never written, so any number of such profiles may coexist
/// while every non-empty `msisdn` is unique.
#[async_trait]
pub trait ProfilesRepository: Send + Sync {
    /// Create the unique sparse index on `msisdn` if it does not exist yet.
    async fn ensure_indexes(&self) -> Result<(), StoreError>;
    async fn find_all(&self) -> Result<Vec<UserProfile>, StoreError>;
    async fn find_by_msisdn(&self, msisdn: &str) -> Result<Option<UserProfile>, StoreError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<UserProfile>, StoreError>;
    /// Insert a new document. Returns the store-assigned id.
    async fn insert(&self, data: &ProfileData) -> Result<String, StoreError>;
    /// Replace the first document matching `msisdn`, keeping its id.
    /// Returns the id of the replaced document, `None` if nothing matched.
    async fn replace_by_msisdn(
        &self,
        msisdn: &str,
        data: &ProfileData,
    ) -> Result<Option<String>, StoreError>;
    /// Delete the first document matching `msisdn`. Returns true if one was deleted.
    async fn delete_by_msisdn(&self, msisdn: &str) -> Result<bool, StoreError>;
    /// Release connections. Called once at process shutdown.
    async fn close(&self) {}
}
