use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier of an index within the service.
pub type IndexUid = String;

/// Index metadata as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMetadata {
    pub uid: IndexUid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of an index creation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexConfig {
    pub uid: IndexUid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
}

impl IndexConfig {
    pub fn new(uid: impl Into<IndexUid>) -> Self {
        Self {
            uid: uid.into(),
            primary_key: None,
        }
    }

    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = Some(primary_key.into());
        self
    }
}

/// Handle returned synchronously by every mutation the service processes
/// asynchronously. Only a correlation token for later status polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncUpdateId {
    pub update_id: u64,
}

impl AsyncUpdateId {
    pub fn new(update_id: u64) -> Self {
        Self { update_id }
    }
}

impl From<u64> for AsyncUpdateId {
    fn from(update_id: u64) -> Self {
        Self { update_id }
    }
}

impl std::fmt::Display for AsyncUpdateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.update_id)
    }
}

/// Processing state of an update. Moves enqueued -> processing ->
/// processed | failed and never leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStatus {
    Enqueued,
    Processing,
    Processed,
    Failed,
}

impl UpdateStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, UpdateStatus::Processed | UpdateStatus::Failed)
    }
}

impl std::fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateStatus::Enqueued => write!(f, "enqueued"),
            UpdateStatus::Processing => write!(f, "processing"),
            UpdateStatus::Processed => write!(f, "processed"),
            UpdateStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Status record of a single update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    pub status: UpdateStatus,
    pub update_id: u64,
    /// Summary of the submitted payload, e.g. `{"name": "DocumentsAddition", "number": 3}`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub update_type: Option<serde_json::Value>,
    /// Set only when `status` is `failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Processing time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enqueued_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
}

impl Update {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Snapshot of index statistics, recomputed by the service on each fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub number_of_documents: u64,
    pub is_indexing: bool,
    #[serde(default)]
    pub fields_distribution: HashMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub commit_sha: String,
    pub build_date: String,
    pub pkg_version: String,
}

/// Pagination and projection for listing documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentsQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub attributes_to_retrieve: Vec<String>,
}

/// Structured search request, translated to query parameters by
/// [`crate::search::search_params`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub filters: String,
    pub offset: i64,
    pub limit: i64,
    pub crop_length: i64,
    pub attributes_to_retrieve: Vec<String>,
    pub attributes_to_crop: Vec<String>,
    pub attributes_to_highlight: Vec<String>,
    pub matches: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: 20,
            crop_length: 200,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub hits: Vec<serde_json::Value>,
    pub offset: i64,
    pub limit: i64,
    pub processing_time_ms: i64,
    pub query: String,
    #[serde(default)]
    pub nb_hits: i64,
    #[serde(default)]
    pub exhaustive_nb_hits: bool,
}
