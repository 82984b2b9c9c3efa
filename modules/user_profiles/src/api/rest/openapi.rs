use modkit::{Problem, ValidationError};
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};

/// OpenAPI description of the profile routes.
#[derive(OpenApi)]
#[openapi(
    info(title = "User Profiles API", description = "CRUD over user profiles keyed by msisdn"),
    paths(
        handlers::welcome,
        handlers::list_profiles,
        handlers::get_profile,
        handlers::create_profile,
        handlers::update_profile,
        handlers::delete_profile
    ),
    components(schemas(
        dto::UserProfileDto,
        dto::ProfileReq,
        dto::WelcomeDto,
        dto::ProfileListResponse,
        dto::ProfileResponse,
        dto::ProfileCreatedResponse,
        dto::ProfileUpdatedResponse,
        dto::ProfileDeletedResponse,
        Problem,
        ValidationError
    )),
    tags((name = "users", description = "User profile management"))
)]
pub struct ProfilesApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ProfilesApiDoc::openapi()
}
