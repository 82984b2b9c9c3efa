use axum::http::StatusCode;
use modkit::{Problem, ProblemResponse, ValidationError};

use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
    request_id: Option<&str>,
) -> ProblemResponse {
    let mut problem = Problem::coded(status, code, title, detail).with_instance(instance);
    if let Some(id) = request_id {
        problem = problem.with_request_id(id);
    }
    ProblemResponse(problem)
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(
    e: &DomainError,
    instance: &str,
    request_id: Option<&str>,
) -> ProblemResponse {
    match e {
        DomainError::ProfileNotFound { msisdn } => from_parts(
            StatusCode::NOT_FOUND,
            "PROFILES_NOT_FOUND",
            "Profile not found",
            format!("Profile with msisdn '{msisdn}' was not found"),
            instance,
            request_id,
        ),
        DomainError::MsisdnConflict { msisdn } => from_parts(
            StatusCode::CONFLICT,
            "PROFILES_MSISDN_CONFLICT",
            "Msisdn already exists",
            format!("Msisdn '{msisdn}' is already in use"),
            instance,
            request_id,
        ),
        DomainError::Validation { field, message } => {
            let ProblemResponse(problem) = from_parts(
                StatusCode::BAD_REQUEST,
                "PROFILES_VALIDATION",
                "Validation error",
                e.to_string(),
                instance,
                request_id,
            );
            // "body.msisdn" -> "/body/msisdn"
            ProblemResponse(problem.with_errors(vec![ValidationError {
                detail: message.clone(),
                pointer: format!("/{}", field.replace('.', "/")),
            }]))
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Profile store error");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROFILES_INTERNAL_STORE",
                "Internal error",
                "An internal storage error occurred",
                instance,
                request_id,
            )
        }
    }
}
