use async_trait::async_trait;

use crate::contract::{
    error::UserProfilesError,
    model::{ProfileData, UserProfile},
};

/// Public API of the user_profiles module for in-process consumers
#[async_trait]
pub trait UserProfilesApi: Send + Sync {
    /// All stored profiles, in store order
    async fn list_profiles(&self) -> Result<Vec<UserProfile>, UserProfilesError>;

    async fn get_profile(&self, msisdn: &str) -> Result<UserProfile, UserProfilesError>;

    /// Create a profile; the returned value is read back from the store
    async fn create_profile(&self, data: ProfileData) -> Result<UserProfile, UserProfilesError>;

    /// Replace the profile currently stored under `msisdn` with `data`
    async fn update_profile(
        &self,
        msisdn: &str,
        data: ProfileData,
    ) -> Result<UserProfile, UserProfilesError>;

    async fn delete_profile(&self, msisdn: &str) -> Result<(), UserProfilesError>;
}
