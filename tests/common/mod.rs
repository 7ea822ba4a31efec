#![allow(dead_code)]

pub mod assertions;
pub mod source;

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use meilisearch_client::{Client, ClientConfig};

use mock_server::MockServer;

/// Install a test subscriber once per process. `RUST_LOG` overrides the level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Start a fake service and a client pointed at it.
pub async fn start_test_client() -> (Client, MockServer) {
    init_tracing();
    let server = MockServer::start().await;
    let client = Client::new(test_config(&server)).unwrap();
    (client, server)
}

pub fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(server.base_url.clone())
        .with_timeout(Duration::from_secs(5))
        .with_poll_interval(Duration::from_millis(10))
}
