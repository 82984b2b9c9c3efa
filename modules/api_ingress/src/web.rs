use std::any::Any;
use std::sync::Arc;

use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use modkit::{Problem, ProblemResponse, RequestId};
use serde_json::{json, Value};

pub const ROUTE_NOT_FOUND: &str = "ROUTE_NOT_FOUND";
pub const INTERNAL_PANIC: &str = "INTERNAL_PANIC";

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Fallback for paths no module claimed.
pub async fn route_not_found(uri: Uri, request_id: RequestId) -> ProblemResponse {
    let mut problem = Problem::coded(
        StatusCode::NOT_FOUND,
        ROUTE_NOT_FOUND,
        "Not Found",
        format!("No route for '{}'", uri.path()),
    )
    .with_instance(uri.path());
    if let Some(id) = request_id.0 {
        problem = problem.with_request_id(id);
    }
    problem.into()
}

/// Response for a handler that panicked. The panic message goes to the log only.
pub fn panic_to_problem(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = %message, "Request handler panicked");

    ProblemResponse(Problem::coded(
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_PANIC,
        "Internal Server Error",
        "The request could not be completed",
    ))
    .into_response()
}

/// Pre-serialized OpenAPI document.
pub async fn serve_openapi(doc: Arc<Value>) -> Response {
    (
        [(header::CACHE_CONTROL, "no-store")],
        Json((*doc).clone()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn panic_message_is_logged_not_returned() {
        let resp = panic_to_problem(Box::new(String::from("index out of bounds: secret")));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], INTERNAL_PANIC);
        assert!(!body["detail"].as_str().unwrap().contains("secret"));
        assert!(logs_contain("Request handler panicked"));
        assert!(logs_contain("index out of bounds: secret"));
    }
}
