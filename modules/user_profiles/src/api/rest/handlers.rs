use std::sync::Arc;

use axum::{extract::Path, http::Uri, response::Json, Extension};
use modkit::{ApiJson, Problem, ProblemResponse, RequestId};
use tracing::{error, info};

use crate::api::rest::dto::{
    ProfileCreatedResponse, ProfileDeletedResponse, ProfileListResponse, ProfileReq,
    ProfileResponse, ProfileUpdatedResponse, UserProfileDto, WelcomeDto, CREATED_MESSAGE,
    DELETED_MESSAGE, UPDATED_MESSAGE, WELCOME_MESSAGE,
};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;

#[utoipa::path(
    get,
    path = "/",
    tag = "users",
    responses((status = 200, description = "Service greeting", body = WelcomeDto))
)]
pub async fn welcome() -> Json<WelcomeDto> {
    Json(WelcomeDto {
        message: WELCOME_MESSAGE.to_string(),
    })
}

/// List all profiles
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All stored profiles", body = ProfileListResponse),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_profiles(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    request_id: RequestId,
) -> Result<Json<ProfileListResponse>, ProblemResponse> {
    info!("Listing profiles");

    match svc.list_profiles().await {
        Ok(profiles) => Ok(Json(ProfileListResponse {
            response: profiles.into_iter().map(UserProfileDto::from).collect(),
        })),
        Err(e) => {
            error!("Failed to list profiles: {}", e);
            Err(map_domain_error(&e, uri.path(), request_id.as_deref()))
        }
    }
}

/// Get a profile by msisdn
#[utoipa::path(
    get,
    path = "/users/{msisdn}",
    tag = "users",
    params(("msisdn" = String, Path, description = "Profile phone number")),
    responses(
        (status = 200, description = "Profile found", body = ProfileResponse),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_profile(
    Extension(svc): Extension<Arc<Service>>,
    Path(msisdn): Path<String>,
    uri: Uri,
    request_id: RequestId,
) -> Result<Json<ProfileResponse>, ProblemResponse> {
    info!("Getting profile with msisdn: {}", msisdn);

    match svc.get_profile(&msisdn).await {
        Ok(profile) => Ok(Json(ProfileResponse {
            response: profile.into(),
        })),
        Err(e) => {
            error!("Failed to get profile {}: {}", msisdn, e);
            Err(map_domain_error(&e, uri.path(), request_id.as_deref()))
        }
    }
}

/// Create a new profile
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = ProfileReq,
    responses(
        (status = 200, description = "Created profile", body = ProfileCreatedResponse),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Conflict", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn create_profile(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    request_id: RequestId,
    ApiJson(req_body): ApiJson<ProfileReq>,
) -> Result<Json<ProfileCreatedResponse>, ProblemResponse> {
    info!("Creating profile: {:?}", req_body);

    match svc.create_profile(req_body.into()).await {
        Ok(profile) => Ok(Json(ProfileCreatedResponse {
            response: CREATED_MESSAGE.to_string(),
            message: profile.into(),
        })),
        Err(e) => {
            error!("Failed to create profile: {}", e);
            Err(map_domain_error(&e, uri.path(), request_id.as_deref()))
        }
    }
}

/// Replace the profile stored under msisdn
#[utoipa::path(
    patch,
    path = "/users/{msisdn}",
    tag = "users",
    params(("msisdn" = String, Path, description = "Current phone number of the profile")),
    request_body = ProfileReq,
    responses(
        (status = 200, description = "Updated profile", body = ProfileUpdatedResponse),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Conflict", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn update_profile(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(msisdn): Path<String>,
    request_id: RequestId,
    ApiJson(req_body): ApiJson<ProfileReq>,
) -> Result<Json<ProfileUpdatedResponse>, ProblemResponse> {
    info!("Updating profile {} with: {:?}", msisdn, req_body);

    match svc.update_profile(&msisdn, req_body.into()).await {
        Ok(profile) => Ok(Json(ProfileUpdatedResponse {
            response: UPDATED_MESSAGE.to_string(),
            data: profile.into(),
        })),
        Err(e) => {
            error!("Failed to update profile {}: {}", msisdn, e);
            Err(map_domain_error(&e, uri.path(), request_id.as_deref()))
        }
    }
}

/// Delete the profile stored under msisdn. The body must be a valid profile but is not used.
#[utoipa::path(
    delete,
    path = "/users/{msisdn}",
    tag = "users",
    params(("msisdn" = String, Path, description = "Profile phone number")),
    request_body = ProfileReq,
    responses(
        (status = 200, description = "Profile deleted", body = ProfileDeletedResponse),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn delete_profile(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(msisdn): Path<String>,
    request_id: RequestId,
    ApiJson(_ignored): ApiJson<ProfileReq>,
) -> Result<Json<ProfileDeletedResponse>, ProblemResponse> {
    info!("Deleting profile: {}", msisdn);

    match svc.delete_profile(&msisdn).await {
        Ok(()) => Ok(Json(ProfileDeletedResponse {
            response: DELETED_MESSAGE.to_string(),
        })),
        Err(e) => {
            error!("Failed to delete profile {}: {}", msisdn, e);
            Err(map_domain_error(&e, uri.path(), request_id.as_deref()))
        }
    }
}
