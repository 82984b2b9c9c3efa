use std::sync::Arc;

use anyhow::Context;
use runtime::DatabaseConfig;
use tracing::{debug, info};

use crate::api::rest::{openapi, routes};
use crate::config::UserProfilesConfig;
use crate::contract::client::UserProfilesApi;
use crate::domain::repo::ProfilesRepository;
use crate::domain::service::Service;
use crate::gateways::local::UserProfilesLocalClient;
use crate::infra::storage::{InMemoryProfilesRepository, MongoProfilesRepository};

pub const MODULE_NAME: &str = "user_profiles";

/// Wired user_profiles module: store, domain service and REST surface.
#[derive(Clone)]
pub struct UserProfiles {
    service: Arc<Service>,
}

impl UserProfiles {
    /// Build the module over an existing store, creating the msisdn index when configured.
    pub async fn init(
        repo: Arc<dyn ProfilesRepository>,
        cfg: &UserProfilesConfig,
    ) -> anyhow::Result<Self> {
        info!("Initializing user_profiles module");
        debug!(
            "Loaded user_profiles config: collection={}, ensure_indexes={}",
            cfg.collection, cfg.ensure_indexes
        );

        if cfg.ensure_indexes {
            repo.ensure_indexes()
                .await
                .context("failed to create msisdn index")?;
        }

        Ok(Self {
            service: Arc::new(Service::new(repo)),
        })
    }

    /// Connect to MongoDB and build the module on top of it.
    pub async fn connect(db: &DatabaseConfig, cfg: &UserProfilesConfig) -> anyhow::Result<Self> {
        let repo = MongoProfilesRepository::connect(db, &cfg.collection).await?;
        Self::init(Arc::new(repo), cfg).await
    }

    /// Module over a fresh in-process store.
    pub async fn in_memory(cfg: &UserProfilesConfig) -> anyhow::Result<Self> {
        info!("Using in-memory profile store");
        Self::init(Arc::new(InMemoryProfilesRepository::new()), cfg).await
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// Local in-process client for other modules.
    pub fn client(&self) -> Arc<dyn UserProfilesApi> {
        Arc::new(UserProfilesLocalClient::new(self.service.clone()))
    }

    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        info!("Registering user_profiles REST routes");
        routes::register_routes(router, self.service.clone())
    }

    pub fn openapi(&self) -> utoipa::openapi::OpenApi {
        openapi::openapi()
    }

    /// Release the store. Call once, after the HTTP server stopped.
    pub async fn shutdown(&self) {
        self.service.close().await;
        info!("user_profiles module stopped");
    }
}
