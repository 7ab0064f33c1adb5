//! Shared fixtures for integration tests

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use gcore_cdn::{AuthOptions, Client, ClientConfig, CommonClient, LOGIN_PATH, ResellerClient};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

pub const FAKE_TOKEN: &str =
    "eyJ0eXAiOiJKV1Q2lkIjo1MTEsImVtCJ1c2V2ns-QgWxERsywROmzASDniT3VHebO1DqgJ5ZIg";

/// Login answer whose token expires in the past
pub fn expired_login_body() -> serde_json::Value {
    serde_json::json!({"token": FAKE_TOKEN, "expire": "2017-04-17T01:28:15.000Z"})
}

/// Login answer whose token stays valid for the whole test run
pub fn valid_login_body() -> serde_json::Value {
    serde_json::json!({"token": FAKE_TOKEN, "expire": "2999-01-01T00:00:00.000Z"})
}

pub fn auth_options() -> AuthOptions {
    AuthOptions::new("user@example.com", "secret")
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::with_base_url(&server.uri()).expect("mock URI is a valid base URL")
}

pub fn client_for(server: &MockServer) -> Client {
    Client::new(config_for(server)).expect("client builds")
}

/// Mount the login endpoint, answering with `body`
pub async fn mount_login(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_json(serde_json::json!({
            "username": "user@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Authenticated common client against `server`
pub async fn common_client(server: &MockServer) -> CommonClient {
    mount_login(server, valid_login_body()).await;
    let client = CommonClient::new(config_for(server)).expect("client builds");
    client
        .authenticate(&auth_options())
        .await
        .expect("login should succeed");
    client
}

/// Authenticated reseller client against `server`
pub async fn reseller_client(server: &MockServer) -> ResellerClient {
    mount_login(server, valid_login_body()).await;
    let client = ResellerClient::new(config_for(server)).expect("client builds");
    client
        .authenticate(&auth_options())
        .await
        .expect("login should succeed");
    client
}

pub fn authorization() -> String {
    format!("Token {FAKE_TOKEN}")
}
