use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, IndexOptions},
    Client, Collection, IndexModel,
};
use runtime::DatabaseConfig;
use tracing::{debug, info};

use super::document::ProfileDocument;
use super::MSISDN_INDEX;
use crate::contract::model::{ProfileData, UserProfile};
use crate::domain::repo::{ProfilesRepository, StoreError};

const DUPLICATE_KEY: i32 = 11000;

/// MongoDB-backed profile store.
#[derive(Clone)]
pub struct MongoProfilesRepository {
    client: Client,
    profiles: Collection<ProfileDocument>,
}

impl MongoProfilesRepository {
    pub fn new(client: Client, database: &str, collection: &str) -> Self {
        let profiles = client.database(database).collection(collection);
        Self { client, profiles }
    }

    /// Build a client from config and check the server answers.
    pub async fn connect(cfg: &DatabaseConfig, collection: &str) -> anyhow::Result<Self> {
        cfg.validate()?;

        let mut opts = ClientOptions::parse(&cfg.url)
            .await
            .with_context(|| format!("invalid MongoDB connection string for '{}'", cfg.name))?;
        opts.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        if let Some(n) = cfg.max_pool_size {
            opts.max_pool_size = Some(n);
        }
        if let Some(ms) = cfg.connect_timeout_ms {
            opts.connect_timeout = Some(Duration::from_millis(ms));
        }
        if let Some(ms) = cfg.server_selection_timeout_ms {
            opts.server_selection_timeout = Some(Duration::from_millis(ms));
        }

        let client = Client::with_options(opts).context("failed to build MongoDB client")?;
        client
            .database(&cfg.name)
            .run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB did not answer ping")?;

        info!(database = %cfg.name, collection, "Connected to MongoDB");
        Ok(Self::new(client, &cfg.name, collection))
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == DUPLICATE_KEY,
        ErrorKind::Command(ce) => ce.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn write_error(err: mongodb::error::Error, msisdn: &str, op: &'static str) -> StoreError {
    if is_duplicate_key(&err) {
        StoreError::DuplicateMsisdn {
            msisdn: msisdn.to_string(),
        }
    } else {
        StoreError::Other(anyhow::Error::new(err).context(op))
    }
}

#[async_trait]
impl ProfilesRepository for MongoProfilesRepository {
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "msisdn": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name(MSISDN_INDEX.to_string())
                    .build(),
            )
            .build();

        self.profiles
            .create_index(index)
            .await
            .context("create msisdn index")?;
        debug!(index = MSISDN_INDEX, "Index ensured");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<UserProfile>, StoreError> {
        let cursor = self.profiles.find(doc! {}).await.context("find profiles")?;
        let docs: Vec<ProfileDocument> = cursor.try_collect().await.context("read profiles")?;
        Ok(docs.into_iter().map(UserProfile::from).collect())
    }

    async fn find_by_msisdn(&self, msisdn: &str) -> Result<Option<UserProfile>, StoreError> {
        let found = self
            .profiles
            .find_one(doc! { "msisdn": msisdn })
            .await
            .context("find profile by msisdn")?;
        Ok(found.map(UserProfile::from))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserProfile>, StoreError> {
        // ids not produced by the store cannot match anything
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let found = self
            .profiles
            .find_one(doc! { "_id": oid })
            .await
            .context("find profile by id")?;
        Ok(found.map(UserProfile::from))
    }

    async fn insert(&self, data: &ProfileData) -> Result<String, StoreError> {
        let res = self
            .profiles
            .insert_one(ProfileDocument::from(data))
            .await
            .map_err(|e| write_error(e, &data.msisdn, "insert profile"))?;

        res.inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| anyhow!("unexpected inserted id: {}", res.inserted_id).into())
    }

    async fn replace_by_msisdn(
        &self,
        msisdn: &str,
        data: &ProfileData,
    ) -> Result<Option<String>, StoreError> {
        // the pre-image is returned, it still carries the matched _id
        let before = self
            .profiles
            .find_one_and_replace(doc! { "msisdn": msisdn }, ProfileDocument::from(data))
            .await
            .map_err(|e| write_error(e, &data.msisdn, "replace profile"))?;
        Ok(before.and_then(|d| d.id).map(|oid| oid.to_hex()))
    }

    async fn delete_by_msisdn(&self, msisdn: &str) -> Result<bool, StoreError> {
        let res = self
            .profiles
            .delete_one(doc! { "msisdn": msisdn })
            .await
            .context("delete profile")?;
        Ok(res.deleted_count > 0)
    }

    async fn close(&self) {
        info!("Closing MongoDB client");
        self.client.clone().shutdown().await;
    }
}
