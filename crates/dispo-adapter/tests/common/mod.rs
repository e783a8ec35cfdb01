/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for dispo-adapter tests

use dispo_adapter::{ClientConfig, DispoClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> DispoClient {
    DispoClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init")
}

/// Client pointed at the mock server with a stored token pair
#[allow(dead_code)]
pub fn authed_client_for(server: &MockServer) -> DispoClient {
    let client = client_for(server);
    client.tokens().set_tokens("access-token", "refresh-token");
    client
}

/// Minimal successful envelope around a payload
pub fn envelope(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "message": "OK",
        "data": data,
    })
}
