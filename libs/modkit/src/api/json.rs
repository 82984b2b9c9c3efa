use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
};

use super::problem::{Problem, ProblemResponse};

/// `axum::Json` with rejections rendered as problem documents instead of plain text.
///
/// Malformed syntax and wrong-typed fields both map to 400 so the module error
/// taxonomy has a single "invalid request" bucket.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ProblemResponse))]
pub struct ApiJson<T>(pub T);

pub const INVALID_JSON_BODY: &str = "INVALID_JSON_BODY";

impl From<JsonRejection> for ProblemResponse {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                StatusCode::BAD_REQUEST
            }
            other => other.status(),
        };
        tracing::debug!(status = %status, "rejected request body: {}", rejection.body_text());
        Problem::coded(
            status,
            INVALID_JSON_BODY,
            "Invalid request body",
            rejection.body_text(),
        )
        .into()
    }
}
