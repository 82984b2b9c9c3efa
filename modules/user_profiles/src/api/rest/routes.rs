use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the profile routes on `router`, sharing `service` through an `Extension`.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route("/", get(handlers::welcome))
        .route(
            "/users",
            get(handlers::list_profiles).post(handlers::create_profile),
        )
        .route(
            "/users/{msisdn}",
            patch(handlers::update_profile)
                .get(handlers::get_profile)
                .delete(handlers::delete_profile),
        )
        .layer(Extension(service))
}
