use std::fmt::Debug;

use meilisearch_client::error::ClientError;
use meilisearch_client::types::UpdateStatus;
use meilisearch_client::Index;

/// Assert that a result is a `NotFound` error.
pub fn assert_not_found<T: Debug>(result: Result<T, ClientError>) {
    match result {
        Err(ClientError::NotFound { .. }) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}

/// Assert that a result is an `AlreadyExists` error.
pub fn assert_already_exists<T: Debug>(result: Result<T, ClientError>) {
    match result {
        Err(ClientError::AlreadyExists { .. }) => {}
        other => panic!("expected AlreadyExists, got {other:?}"),
    }
}

/// Assert the status the service currently reports for an update.
pub async fn assert_update_status(index: &Index, update_id: u64, expected: UpdateStatus) {
    let update = index
        .get_update_status(update_id)
        .await
        .unwrap_or_else(|e| panic!("failed to fetch update {update_id}: {e}"));
    assert_eq!(
        update.status, expected,
        "update {update_id} of '{}' has status {}, expected {expected}",
        index.uid(),
        update.status
    );
}

/// Assert that an index exists and carries the expected primary key.
pub async fn assert_index_primary_key(index: &Index, expected: Option<&str>) {
    let meta = index
        .fetch_info()
        .await
        .unwrap_or_else(|e| panic!("failed to fetch index '{}': {e}", index.uid()));
    assert_eq!(
        meta.primary_key.as_deref(),
        expected,
        "primary key of '{}' does not match",
        index.uid()
    );
}
