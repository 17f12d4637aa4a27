//! Shared helpers for the mock-server integration tests

use cryptex::core::config::ExchangeConfig;
use cryptex::core::kernel::{Clock, NonceGenerator};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

/// Base64 secret in the format Kraken issues
#[allow(dead_code)]
pub const KRAKEN_TEST_SECRET: &str =
    "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    init_tracing();
    MockServer::start().await
}

/// Route crate logs to the test writer; `RUST_LOG=cryptex=trace` shows bodies
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Clock that never moves, so every nonce after the first is `ticks + n`
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn ticks(&self) -> u64 {
        self.0
    }
}

#[allow(dead_code)]
pub fn fixed_nonce(ticks: u64) -> NonceGenerator {
    NonceGenerator::with_clock(Arc::new(FixedClock(ticks)))
}

/// Config pointing at the mock server, with default credentials
#[allow(dead_code)]
pub fn config_for(server: &MockServer, path: &str, api_key: &str, secret: &str) -> ExchangeConfig {
    ExchangeConfig::new(api_key.to_string(), secret.to_string())
        .expect("test credentials are non-empty")
        .base_url(format!("{}{}", server.uri(), path))
}

/// Config pointing at the mock server, without credentials
#[allow(dead_code)]
pub fn read_only_config_for(server: &MockServer, path: &str) -> ExchangeConfig {
    ExchangeConfig::read_only().base_url(format!("{}{}", server.uri(), path))
}
