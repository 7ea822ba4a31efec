//! Index handle and the operations scoped to a single index.
//!
//! Lifecycle calls live here; document ingestion and update status reads
//! live in `documents` and `updates`.

pub mod documents;
pub mod updates;

use reqwest::Method;
use serde_json::json;
use tracing::{info, instrument};

use crate::client::Client;
use crate::error::Result;
use crate::transport::{Request, Transport};
use crate::types::{IndexMetadata, IndexStats};

/// Handle on one index. Holds only the uid and the client; every accessor
/// re-reads server state.
#[derive(Debug, Clone)]
pub struct Index {
    uid: String,
    client: Client,
}

impl Index {
    pub(crate) fn new(client: Client, uid: String) -> Self {
        Self { uid, client }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn transport(&self) -> &Transport {
        self.client.transport()
    }

    /// Path segments under `/indexes/{uid}`.
    pub(crate) fn path(&self, rest: &[&str]) -> Vec<String> {
        ["indexes", self.uid.as_str()]
            .iter()
            .chain(rest)
            .map(|s| s.to_string())
            .collect()
    }

    #[instrument(skip(self), fields(index = %self.uid))]
    pub async fn fetch_info(&self) -> Result<IndexMetadata> {
        let request = Request::get(self.path(&[]), "FetchInfo");
        self.transport().execute(request).await
    }

    pub async fn fetch_primary_key(&self) -> Result<Option<String>> {
        Ok(self.fetch_info().await?.primary_key)
    }

    /// Set the primary key. The service refuses once documents are indexed.
    #[instrument(skip(self), fields(index = %self.uid))]
    pub async fn update_index(&self, primary_key: &str) -> Result<IndexMetadata> {
        let request = Request::new(Method::PUT, self.path(&[]), &[200], "UpdateIndex")
            .with_json(&json!({ "primaryKey": primary_key }))?;
        let meta: IndexMetadata = self.transport().execute(request).await?;

        info!(primary_key, "updated index");
        Ok(meta)
    }

    /// Delete this index. `Ok(true)` on success; a missing index is `NotFound`.
    pub async fn delete(&self) -> Result<bool> {
        self.client.delete_index(&self.uid).await
    }

    #[instrument(skip(self), fields(index = %self.uid))]
    pub async fn get_stats(&self) -> Result<IndexStats> {
        let request = Request::get(self.path(&["stats"]), "GetStats");
        self.transport().execute(request).await
    }
}
