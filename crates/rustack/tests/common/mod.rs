//! Common test utilities and helpers

use rustack::{Client, ClientConfig, Timing};
use std::time::Duration;
use wiremock::MockServer;

/// Token the test clients authenticate with
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-token-0123456789";

/// Short waits so retry and poll loops finish quickly against a live mock server
#[allow(dead_code)]
pub fn fast_timing() -> Timing {
    Timing {
        lock_retry_interval: Duration::from_millis(10),
        lock_timeout: Duration::from_secs(5),
        task_poll_interval: Duration::from_millis(10),
        task_timeout: Duration::from_secs(5),
        lock_wait_interval: Duration::from_millis(10),
        lock_wait_timeout: Some(Duration::from_secs(5)),
    }
}

/// A client pointed at the mock server
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> Client {
    Client::from_config(ClientConfig {
        base_url: Some(server.uri()),
        timing: fast_timing(),
        ..ClientConfig::with_token(TEST_TOKEN)
    })
    .expect("Failed to build client")
}

/// One page of a paginated listing
#[allow(dead_code)]
pub fn page(items: serde_json::Value) -> serde_json::Value {
    let count = items.as_array().map(Vec::len).unwrap_or_default();
    serde_json::json!({ "total": count, "limit": 20, "items": items })
}
