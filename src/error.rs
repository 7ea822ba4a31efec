use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    // Transport errors
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // Serialization errors
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Service errors
    #[error(
        "{function}: unexpected status {status} for {method} {endpoint} (expected {expected:?}): {message}"
    )]
    UnexpectedStatus {
        function: &'static str,
        method: String,
        endpoint: String,
        status: u16,
        expected: Vec<u16>,
        message: String,
        code: Option<String>,
    },

    #[error("not found: {endpoint}: {message}")]
    NotFound { endpoint: String, message: String },

    #[error("already exists: {message}")]
    AlreadyExists { message: String },

    // Update tracking errors
    #[error("update {update_id} failed: {message}")]
    UpdateFailed { update_id: u64, message: String },

    #[error("deadline exceeded after {elapsed:?} waiting for update {update_id}")]
    DeadlineExceeded { update_id: u64, elapsed: Duration },

    #[error("wait for update {update_id} cancelled")]
    Cancelled { update_id: u64 },

    // Validation errors
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // Config errors
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// HTTP status reported by the service, if this error came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::NotFound { .. } => Some(404),
            ClientError::AlreadyExists { .. } => Some(409),
            ClientError::UnexpectedStatus { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, ClientError::AlreadyExists { .. })
    }

    /// True when the wait stopped before the update reached a terminal state,
    /// so its real outcome is still unknown.
    pub fn is_wait_interrupted(&self) -> bool {
        matches!(
            self,
            ClientError::DeadlineExceeded { .. } | ClientError::Cancelled { .. }
        )
    }
}
