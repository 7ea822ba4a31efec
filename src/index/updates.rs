use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use crate::error::Result;
use crate::transport::Request;
use crate::types::{AsyncUpdateId, Update, UpdateStatus};
use crate::updates::{wait_for_update, UpdateSource, WaitDeadline};

use super::Index;

impl Index {
    /// Read the current status of one update. An unknown id is `NotFound`.
    #[instrument(skip(self), fields(index = %self.uid))]
    pub async fn get_update_status(&self, update_id: u64) -> Result<Update> {
        let request = Request::get(
            self.path(&["updates", update_id.to_string().as_str()]),
            "GetUpdateStatus",
        );
        self.transport().execute(request).await
    }

    /// All updates of this index, ordered by ascending update id.
    #[instrument(skip(self), fields(index = %self.uid))]
    pub async fn get_all_update_status(&self) -> Result<Vec<Update>> {
        let request = Request::get(self.path(&["updates"]), "GetAllUpdateStatus");
        let mut updates: Vec<Update> = self.transport().execute(request).await?;
        updates.sort_by_key(|u| u.update_id);
        Ok(updates)
    }

    /// Poll `update` every `poll_interval` until it is processed, it fails, or
    /// `deadline` fires.
    ///
    /// Returns `Ok(UpdateStatus::Processed)` on success and
    /// `Err(ClientError::UpdateFailed)` with the service's message when the
    /// update failed. `DeadlineExceeded` and `Cancelled` mean the outcome is
    /// still unknown.
    pub async fn wait_for_pending_update(
        &self,
        update: AsyncUpdateId,
        poll_interval: Duration,
        deadline: impl Into<WaitDeadline>,
    ) -> Result<UpdateStatus> {
        wait_for_update(self, update, poll_interval, deadline.into()).await
    }

    /// `wait_for_pending_update` with the client's configured poll interval
    /// and no deadline. Only a terminal status or a transport error ends it.
    pub async fn default_wait_for_pending_update(
        &self,
        update: AsyncUpdateId,
    ) -> Result<UpdateStatus> {
        let interval = self.client.config().poll_interval;
        self.wait_for_pending_update(update, interval, WaitDeadline::none())
            .await
    }
}

#[async_trait]
impl UpdateSource for Index {
    fn index_uid(&self) -> &str {
        &self.uid
    }

    async fn fetch_update(&self, update_id: u64) -> Result<Update> {
        self.get_update_status(update_id).await
    }
}
