//! Polling loop that turns an asynchronous update into a completion signal.
//!
//! Each iteration checks cancellation and the deadline, fetches the update
//! once, and returns on a terminal status. Otherwise it sleeps for the poll
//! interval while racing the deadline and the cancellation signal, so neither
//! has to wait out a full interval to take effect.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use crate::error::{ClientError, Result};
use crate::types::{AsyncUpdateId, Update, UpdateStatus};

use super::deadline::{expired, WaitDeadline};

/// Anything that can report the status of an update by id.
///
/// `Index` implements this over HTTP; tests and callers with their own
/// status store can supply another implementation.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Uid of the index the updates belong to. Used for logs and metrics.
    fn index_uid(&self) -> &str;

    /// Fetch the current status of `update_id`. Errors propagate out of the
    /// wait unchanged.
    async fn fetch_update(&self, update_id: u64) -> Result<Update>;
}

/// Why a wait stopped before observing a terminal status.
enum Interruption {
    Deadline,
    Cancelled,
}

/// Poll `source` for `update` until it is processed or failed.
///
/// # Errors
/// * `InvalidArgument` if `poll_interval` is zero.
/// * `UpdateFailed` with the service's message when the update failed.
/// * `DeadlineExceeded` / `Cancelled` when the deadline fires first.
/// * Any error returned by `source.fetch_update`, unchanged.
#[instrument(
    skip(source, update, poll_interval, deadline),
    fields(index = %source.index_uid(), update_id = update.update_id)
)]
pub async fn wait_for_update<S>(
    source: &S,
    update: AsyncUpdateId,
    poll_interval: Duration,
    mut deadline: WaitDeadline,
) -> Result<UpdateStatus>
where
    S: UpdateSource + ?Sized,
{
    if poll_interval.is_zero() {
        return Err(ClientError::InvalidArgument(
            "poll interval must be greater than zero".into(),
        ));
    }

    let index = source.index_uid();
    let update_id = update.update_id;
    let start = Instant::now();
    let at = deadline.instant();
    let mut polls: u64 = 0;

    let outcome = loop {
        if deadline.is_cancelled() {
            break Err(interrupted(Interruption::Cancelled, update_id, start));
        }
        if deadline.is_expired() {
            break Err(interrupted(Interruption::Deadline, update_id, start));
        }

        polls += 1;
        crate::metrics::UPDATE_POLLS_TOTAL
            .with_label_values(&[index])
            .inc();

        let current = match source.fetch_update(update_id).await {
            Ok(current) => current,
            Err(e) => break Err(e),
        };
        debug!(poll = polls, status = %current.status, "polled update");

        if current.is_terminal() {
            if current.status == UpdateStatus::Failed {
                break Err(ClientError::UpdateFailed {
                    update_id,
                    message: current.error.unwrap_or_default(),
                });
            }
            break Ok(current.status);
        }

        let interruption = tokio::select! {
            biased;
            _ = deadline.cancelled() => Some(Interruption::Cancelled),
            _ = expired(at) => Some(Interruption::Deadline),
            _ = tokio::time::sleep(poll_interval) => None,
        };
        if let Some(reason) = interruption {
            break Err(interrupted(reason, update_id, start));
        }
    };

    record_outcome(index, &outcome, polls, start);
    outcome
}

fn interrupted(reason: Interruption, update_id: u64, start: Instant) -> ClientError {
    match reason {
        Interruption::Deadline => ClientError::DeadlineExceeded {
            update_id,
            elapsed: start.elapsed(),
        },
        Interruption::Cancelled => ClientError::Cancelled { update_id },
    }
}

fn record_outcome(index: &str, outcome: &Result<UpdateStatus>, polls: u64, start: Instant) {
    let elapsed = start.elapsed();
    let label = match outcome {
        Ok(_) => "processed",
        Err(ClientError::UpdateFailed { .. }) => "failed",
        Err(ClientError::DeadlineExceeded { .. }) => "deadline_exceeded",
        Err(ClientError::Cancelled { .. }) => "cancelled",
        Err(_) => "error",
    };

    crate::metrics::UPDATE_WAITS_TOTAL
        .with_label_values(&[index, label])
        .inc();
    crate::metrics::UPDATE_WAIT_DURATION
        .with_label_values(&[index])
        .observe(elapsed.as_secs_f64());

    match outcome {
        Ok(_) => debug!(polls, elapsed_ms = elapsed.as_millis(), "update processed"),
        Err(ClientError::UpdateFailed { message, .. }) => {
            warn!(polls, error = %message, "update failed")
        }
        Err(e) => debug!(
            polls,
            elapsed_ms = elapsed.as_millis(),
            error = %e,
            outcome = label,
            "wait ended"
        ),
    }
}
