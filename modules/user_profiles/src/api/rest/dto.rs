use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::contract::model::{ProfileData, UserProfile};

pub const WELCOME_MESSAGE: &str = "Welcome User Micro Service";
pub const CREATED_MESSAGE: &str = "User succesfully created";
pub const UPDATED_MESSAGE: &str = "user record successfully updated";
pub const DELETED_MESSAGE: &str = "user record successfully deleted";

/// REST DTO for a stored profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserProfileDto {
    /// Store-assigned id (ObjectId hex)
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub age: i64,
    pub msisdn: String,
    pub inserted_at: Option<DateTime<Utc>>,
    pub last_update: Option<DateTime<Utc>>,
}

/// Profile body accepted by create, update and delete.
///
/// Every field is optional and defaults to its zero value. An `id` in the body is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProfileReq {
    pub firstname: String,
    pub lastname: String,
    pub age: i64,
    pub msisdn: String,
    pub inserted_at: Option<DateTime<Utc>>,
    pub last_update: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WelcomeDto {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileListResponse {
    pub response: Vec<UserProfileDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub response: UserProfileDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileCreatedResponse {
    pub response: String,
    pub message: UserProfileDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileUpdatedResponse {
    pub response: String,
    pub data: UserProfileDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileDeletedResponse {
    pub response: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<UserProfile> for UserProfileDto {
    fn from(p: UserProfile) -> Self {
        Self {
            id: p.id,
            firstname: p.firstname,
            lastname: p.lastname,
            age: p.age,
            msisdn: p.msisdn,
            inserted_at: p.inserted_at,
            last_update: p.last_update,
        }
    }
}

impl From<ProfileReq> for ProfileData {
    fn from(req: ProfileReq) -> Self {
        Self {
            firstname: req.firstname,
            lastname: req.lastname,
            age: req.age,
            msisdn: req.msisdn,
            inserted_at: req.inserted_at,
            last_update: req.last_update,
        }
    }
}
