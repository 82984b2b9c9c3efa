use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::contract::model::{ProfileData, UserProfile};
use crate::domain::error::DomainError;
use crate::domain::repo::ProfilesRepository;

/// Domain service for user profiles.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ProfilesRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn ProfilesRepository>) -> Self {
        Self { repo }
    }

    /// Release the underlying store.
    pub async fn close(&self) {
        self.repo.close().await;
    }

    #[instrument(name = "user_profiles.service.list_profiles", skip(self))]
    pub async fn list_profiles(&self) -> Result<Vec<UserProfile>, DomainError> {
        debug!("Listing profiles");
        let profiles = self.repo.find_all().await?;
        debug!("Listed {} profiles", profiles.len());
        Ok(profiles)
    }

    #[instrument(name = "user_profiles.service.get_profile", skip(self), fields(msisdn = %msisdn))]
    pub async fn get_profile(&self, msisdn: &str) -> Result<UserProfile, DomainError> {
        debug!("Getting profile by msisdn");
        require_msisdn("msisdn", msisdn)?;

        let profile = self
            .repo
            .find_by_msisdn(msisdn)
            .await?
            .ok_or_else(|| DomainError::profile_not_found(msisdn))?;
        debug!("Successfully retrieved profile");
        Ok(profile)
    }

    /// Insert `data` stamped with `last_update`, then read it back by its new id.
    #[instrument(
        name = "user_profiles.service.create_profile",
        skip(self, data),
        fields(msisdn = %data.msisdn)
    )]
    pub async fn create_profile(&self, mut data: ProfileData) -> Result<UserProfile, DomainError> {
        info!("Creating new profile");
        check_body_msisdn(&data.msisdn)?;

        data.last_update = Some(Utc::now());
        let id = self.repo.insert(&data).await?;

        let created = self.repo.find_by_id(&id).await?.ok_or_else(|| {
            DomainError::database(format!("profile {id} missing right after insert"))
        })?;

        info!("Successfully created profile with id={}", created.id);
        Ok(created)
    }

    /// Full replace of the profile stored under `msisdn`; omitted fields are cleared,
    /// including `msisdn` itself.
    ///
    /// The result is read back under the msisdn carried by `data`, which is where the
    /// document lives after the replace, or by id when `data` has no msisdn.
    #[instrument(
        name = "user_profiles.service.update_profile",
        skip(self, data),
        fields(msisdn = %msisdn, new_msisdn = %data.msisdn)
    )]
    pub async fn update_profile(
        &self,
        msisdn: &str,
        mut data: ProfileData,
    ) -> Result<UserProfile, DomainError> {
        info!("Updating profile");
        require_msisdn("msisdn", msisdn)?;
        check_body_msisdn(&data.msisdn)?;

        data.inserted_at = Some(Utc::now());
        let Some(id) = self.repo.replace_by_msisdn(msisdn, &data).await? else {
            return Err(DomainError::profile_not_found(msisdn));
        };

        let refreshed = if data.msisdn.is_empty() {
            self.repo.find_by_id(&id).await?
        } else {
            self.repo.find_by_msisdn(&data.msisdn).await?
        };
        let updated = match refreshed {
            Some(p) => p,
            None => {
                // replaced, then removed by a concurrent delete before the read
                warn!("Updated profile vanished before it could be read back");
                return Err(DomainError::profile_not_found(msisdn));
            }
        };

        info!("Successfully updated profile");
        Ok(updated)
    }

    #[instrument(name = "user_profiles.service.delete_profile", skip(self), fields(msisdn = %msisdn))]
    pub async fn delete_profile(&self, msisdn: &str) -> Result<(), DomainError> {
        info!("Deleting profile");
        require_msisdn("msisdn", msisdn)?;

        if !self.repo.delete_by_msisdn(msisdn).await? {
            return Err(DomainError::profile_not_found(msisdn));
        }

        info!("Successfully deleted profile");
        Ok(())
    }
}

fn require_msisdn(field: &str, msisdn: &str) -> Result<(), DomainError> {
    if msisdn.trim().is_empty() {
        return Err(DomainError::validation(field, "msisdn must not be blank"));
    }
    Ok(())
}

/// A body may omit `msisdn`, but a present one must be addressable later.
fn check_body_msisdn(msisdn: &str) -> Result<(), DomainError> {
    if msisdn.is_empty() {
        return Ok(());
    }
    require_msisdn("body.msisdn", msisdn)
}
