use std::time::Duration;

use serde::Deserialize;

use crate::error::{ClientError, Result};

pub const DEFAULT_HOST: &str = "http://localhost:7700";

/// Client configuration. Every field has a default, so a partial document
/// (or an empty one) deserializes into a usable config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. `http://localhost:7700`.
    pub host: String,
    /// Sent as `X-Meili-API-Key` when present.
    pub api_key: Option<String>,
    /// Per-request timeout applied by the HTTP client.
    #[serde(with = "duration_ms", rename = "timeout_ms")]
    pub timeout: Duration,
    /// Interval used by `default_wait_for_pending_update`.
    #[serde(with = "duration_ms", rename = "poll_interval_ms")]
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_millis(50),
        }
    }
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Build a config from `MEILI_*` environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("MEILI_HOST") {
            config.host = host;
        }
        if let Some(key) = lookup("MEILI_API_KEY") {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }
        if let Some(ms) = lookup("MEILI_TIMEOUT_MS") {
            config.timeout = parse_millis("MEILI_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = lookup("MEILI_POLL_INTERVAL_MS") {
            config.poll_interval = parse_millis("MEILI_POLL_INTERVAL_MS", &ms)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.host)
            .map_err(|e| ClientError::Config(format!("invalid host '{}': {e}", self.host)))?;
        if self.poll_interval.is_zero() {
            return Err(ClientError::Config(
                "poll_interval must be greater than zero".into(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::Config("timeout must be greater than zero".into()));
        }
        Ok(())
    }
}

fn parse_millis(var: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ClientError::Config(format!("{var}: invalid milliseconds '{value}': {e}")))
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
