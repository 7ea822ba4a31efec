use std::sync::Arc;

use reqwest::Method;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::index::Index;
use crate::transport::{Request, Transport};
use crate::types::{IndexConfig, IndexMetadata, Version};

/// Entry point to the service. Cheap to clone; clones share one transport.
#[derive(Debug, Clone)]
pub struct Client {
    transport: Arc<Transport>,
    config: Arc<ClientConfig>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        crate::metrics::init();
        let transport = Transport::new(&config)?;
        Ok(Self {
            transport: Arc::new(transport),
            config: Arc::new(config),
        })
    }

    /// Build a client from `MEILI_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Local handle on an index. Makes no network call; the index may not exist yet.
    pub fn index(&self, uid: impl Into<String>) -> Index {
        Index::new(self.clone(), uid.into())
    }

    /// Create an index. Fails with `AlreadyExists` if the uid is taken.
    #[instrument(skip(self, config), fields(index = %config.uid))]
    pub async fn create_index(&self, config: &IndexConfig) -> Result<IndexMetadata> {
        let request =
            Request::new(Method::POST, ["indexes"], &[201], "CreateIndex").with_json(config)?;
        let meta: IndexMetadata = self.transport.execute(request).await?;

        info!(primary_key = ?meta.primary_key, "created index");
        Ok(meta)
    }

    /// Create an index, or return the existing one when the uid is taken.
    ///
    /// The conflict is swallowed and the index re-fetched. If the service has
    /// not yet made the conflicting index visible, the re-fetch can still
    /// report `NotFound`; callers needing certainty should retry.
    #[instrument(skip(self, config), fields(index = %config.uid))]
    pub async fn get_or_create_index(&self, config: &IndexConfig) -> Result<IndexMetadata> {
        match self.create_index(config).await {
            Ok(meta) => Ok(meta),
            Err(e) if e.is_already_exists() => {
                debug!("index already exists, fetching it");
                self.get_index(&config.uid).await
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_index(&self, uid: &str) -> Result<IndexMetadata> {
        let request = Request::get(["indexes", uid], "GetIndex");
        self.transport.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn get_all_indexes(&self) -> Result<Vec<IndexMetadata>> {
        let request = Request::get(["indexes"], "GetAllIndexes");
        let indexes: Vec<IndexMetadata> = self.transport.execute(request).await?;
        debug!(count = indexes.len(), "listed indexes");
        Ok(indexes)
    }

    /// Delete an index. `Ok(true)` on success (200 or 204); a missing index
    /// is `NotFound`.
    #[instrument(skip(self))]
    pub async fn delete_index(&self, uid: &str) -> Result<bool> {
        let request = Request::new(
            Method::DELETE,
            ["indexes", uid],
            &[200, 204],
            "DeleteIndex",
        );
        self.transport.execute_no_content(request).await?;

        info!(index = uid, "deleted index");
        Ok(true)
    }

    /// Succeeds when the service reports itself healthy.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<()> {
        let request = Request::new(Method::GET, ["health"], &[200, 204], "Health");
        self.transport.execute_no_content(request).await
    }

    #[instrument(skip(self))]
    pub async fn version(&self) -> Result<Version> {
        let request = Request::get(["version"], "Version");
        self.transport.execute(request).await
    }
}
