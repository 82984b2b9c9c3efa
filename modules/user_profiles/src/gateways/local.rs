use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::UserProfilesApi,
    error::UserProfilesError,
    model::{ProfileData, UserProfile},
};
use crate::domain::service::Service;

/// Local implementation of the UserProfilesApi trait that delegates to the domain service
pub struct UserProfilesLocalClient {
    service: Arc<Service>,
}

impl UserProfilesLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UserProfilesApi for UserProfilesLocalClient {
    async fn list_profiles(&self) -> Result<Vec<UserProfile>, UserProfilesError> {
        self.service.list_profiles().await.map_err(Into::into)
    }

    async fn get_profile(&self, msisdn: &str) -> Result<UserProfile, UserProfilesError> {
        self.service.get_profile(msisdn).await.map_err(Into::into)
    }

    async fn create_profile(&self, data: ProfileData) -> Result<UserProfile, UserProfilesError> {
        self.service.create_profile(data).await.map_err(Into::into)
    }

    async fn update_profile(
        &self,
        msisdn: &str,
        data: ProfileData,
    ) -> Result<UserProfile, UserProfilesError> {
        self.service
            .update_profile(msisdn, data)
            .await
            .map_err(Into::into)
    }

    async fn delete_profile(&self, msisdn: &str) -> Result<(), UserProfilesError> {
        self.service.delete_profile(msisdn).await.map_err(Into::into)
    }
}
