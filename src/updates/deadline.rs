use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Bound on how long a wait may last: an optional instant, an optional
/// cancellation signal, or both. The default is unbounded.
///
/// The cancellation signal is a `watch` channel; sending `true` stops every
/// wait holding a receiver, including one that is asleep between polls.
#[derive(Debug, Clone, Default)]
pub struct WaitDeadline {
    at: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

impl WaitDeadline {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn at(at: Instant) -> Self {
        Self {
            at: Some(at),
            cancel: None,
        }
    }

    /// Deadline `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self::at(Instant::now() + timeout)
    }

    pub fn cancelled_by(cancel: watch::Receiver<bool>) -> Self {
        Self {
            at: None,
            cancel: Some(cancel),
        }
    }

    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn instant(&self) -> Option<Instant> {
        self.at
    }

    pub fn is_expired(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Resolves once cancellation is signalled. A dropped sender can never
    /// cancel, so the future then stays pending.
    pub(crate) async fn cancelled(&mut self) {
        match self.cancel.as_mut() {
            Some(rx) => {
                let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
                if closed {
                    std::future::pending::<()>().await;
                }
            }
            None => std::future::pending().await,
        }
    }
}

/// Resolves once `at` passes. Never resolves without an instant.
pub(crate) async fn expired(at: Option<Instant>) {
    match at {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

impl From<Duration> for WaitDeadline {
    fn from(timeout: Duration) -> Self {
        Self::after(timeout)
    }
}

impl From<Instant> for WaitDeadline {
    fn from(at: Instant) -> Self {
        Self::at(at)
    }
}

impl From<watch::Receiver<bool>> for WaitDeadline {
    fn from(cancel: watch::Receiver<bool>) -> Self {
        Self::cancelled_by(cancel)
    }
}
