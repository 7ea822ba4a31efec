//! Async client for the Meilisearch document search service.
//!
//! Mutations the service applies asynchronously return an [`AsyncUpdateId`];
//! [`Index::wait_for_pending_update`] polls it to completion.

pub mod client;
pub mod config;
pub mod error;
pub mod index;
pub mod metrics;
pub mod search;
pub mod transport;
pub mod types;
pub mod updates;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use index::Index;
pub use types::{
    AsyncUpdateId, DocumentsQuery, IndexConfig, IndexMetadata, IndexStats, SearchRequest,
    SearchResponse, Update, UpdateStatus, Version,
};
pub use updates::{UpdateSource, WaitDeadline};
