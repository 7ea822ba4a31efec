//! Scripted `UpdateSource` for driving the tracker without HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use meilisearch_client::error::{ClientError, Result};
use meilisearch_client::types::{Update, UpdateStatus};
use meilisearch_client::UpdateSource;

/// One scripted response.
#[derive(Debug, Clone)]
pub enum Step {
    Status(UpdateStatus),
    Failed(&'static str),
    NotFound,
}

/// Replays `steps` in order; the last step repeats forever.
pub struct ScriptedSource {
    uid: String,
    steps: Vec<Step>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(uid: &str, steps: Vec<Step>) -> Self {
        assert!(!steps.is_empty(), "script needs at least one step");
        Self {
            uid: uid.to_string(),
            steps,
            calls: AtomicUsize::new(0),
        }
    }

    /// Source that stays `enqueued` forever.
    pub fn stalled(uid: &str) -> Self {
        Self::new(uid, vec![Step::Status(UpdateStatus::Enqueued)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpdateSource for ScriptedSource {
    fn index_uid(&self) -> &str {
        &self.uid
    }

    async fn fetch_update(&self, update_id: u64) -> Result<Update> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let step = &self.steps[call.min(self.steps.len() - 1)];

        let (status, error) = match step {
            Step::Status(status) => (*status, None),
            Step::Failed(message) => (UpdateStatus::Failed, Some(message.to_string())),
            Step::NotFound => {
                return Err(ClientError::NotFound {
                    endpoint: format!("/indexes/{}/updates/{update_id}", self.uid),
                    message: format!("Update {update_id} not found"),
                })
            }
        };

        Ok(Update {
            status,
            update_id,
            update_type: None,
            error,
            duration: None,
            enqueued_at: None,
            processed_at: None,
        })
    }
}
