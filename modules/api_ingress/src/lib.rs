//! HTTP host: wraps module routes with the shared middleware stack, adds the
//! health and OpenAPI endpoints, and serves until cancelled.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{http::StatusCode, middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
pub mod web;

pub use config::{ApiIngressConfig, DEFAULT_BODY_LIMIT_BYTES, DEFAULT_REQUEST_TIMEOUT_SEC};

pub const MODULE_NAME: &str = "api_ingress";

/// Owns the HTTP server for every REST module of the process.
#[derive(Debug, Clone, Default)]
pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    /// Wrap module routes with host endpoints and middleware.
    ///
    /// `openapi` is only mounted when docs are enabled.
    pub fn build_router(
        &self,
        routes: Router,
        openapi: Option<utoipa::openapi::OpenApi>,
    ) -> Result<Router> {
        let mut router = routes
            .route("/health", get(web::health_check))
            .fallback(web::route_not_found);

        match openapi {
            Some(doc) if self.config.enable_docs => {
                let paths = doc.paths.paths.len();
                let doc = Arc::new(serde_json::to_value(&doc)?);
                router = router.route(
                    "/openapi.json",
                    get(move || web::serve_openapi(doc.clone())),
                );
                tracing::info!(paths, "OpenAPI document mounted at /openapi.json");
            }
            _ => tracing::debug!("OpenAPI document disabled"),
        }

        // Layers are added innermost first. Resulting order, outermost to innermost:
        // SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions
        //   -> CatchPanic -> Timeout -> CORS -> BodyLimit
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        router = router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            self.config.request_timeout(),
        ));
        router = router.layer(CatchPanicLayer::custom(web::panic_to_problem));
        router = router.layer(from_fn(request_id::push_req_id_to_extensions));
        router = router.layer(request_id::create_trace_layer());

        let x_request_id = request_id::header();
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        Ok(router)
    }

    /// Bind `addr` and serve until `cancel` fires.
    pub async fn serve(
        &self,
        router: Router,
        addr: SocketAddr,
        cancel: CancellationToken,
    ) -> Result<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {addr}: {e}"))?;
        serve_listener(listener, router, cancel).await
    }
}

/// Serve on an already bound listener with graceful shutdown on cancellation.
pub async fn serve_listener(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> Result<()> {
    let local = listener.local_addr()?;
    tracing::info!("HTTP server bound on {}", local);

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
