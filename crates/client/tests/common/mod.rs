//! Shared helpers for the client integration tests.
#![allow(dead_code)]

use tado::Client;
use tado_common::testing::MockAuthenticator;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token";

/// Client against `base` that never performs a real login.
pub fn client_without_auth(base: &str) -> Client {
    Client::builder()
        .base_url(base)
        .authenticator(MockAuthenticator::new(TEST_TOKEN))
        .build()
        .unwrap()
}

/// Base URL of the API mounted on `server`.
pub fn api_base(server: &MockServer) -> String {
    format!("{}/api/v2/", server.uri())
}

/// Client talking to `server` with [`TEST_TOKEN`] as bearer token.
pub fn client_for(server: &MockServer) -> Client {
    client_without_auth(&api_base(server))
}
