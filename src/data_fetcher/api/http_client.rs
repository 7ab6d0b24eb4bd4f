//! HTTP client creation and configuration utilities

use reqwest::Client;
use std::time::Duration;

/// Creates the reusable HTTP client shared by every endpoint call.
///
/// # Features
/// * One fixed per-request timeout (configurable via config/env)
/// * Connection pooling with centralized pool size configuration
/// * Identifies the crate in the User-Agent header
pub fn create_http_client_with_timeout(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Creates an HTTP client for testing with default timeout
#[cfg(test)]
pub fn create_test_http_client() -> Client {
    create_http_client_with_timeout(crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS)
        .expect("Failed to create test HTTP client")
}
