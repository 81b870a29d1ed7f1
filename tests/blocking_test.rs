//! Tests for the blocking facade
//!
//! The mock server is started on a throwaway runtime; the blocking calls
//! themselves run outside any runtime context.

#![cfg(feature = "blocking")]

use serde_json::json;
use vault_reader_sdk::blocking::{VaultClient, VaultToken};
use vault_reader_sdk::{Error, ExposeSecret, SecretString};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn start_server(runtime: &tokio::runtime::Runtime, mocks: Vec<Mock>) -> MockServer {
    runtime.block_on(async {
        let server = MockServer::start().await;
        for mock in mocks {
            mock.mount(&server).await;
        }
        server
    })
}

#[test]
fn test_blocking_login_read_revoke() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = start_server(
        &runtime,
        vec![
            Mock::given(method("POST"))
                .and(path("/v1/auth/app-id/login"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "lease_id": "",
                    "renewable": false,
                    "lease_duration": 0,
                    "data": null,
                    "auth": {"client_token": "someClientToken", "policies": ["root"]}
                })))
                .expect(1),
            Mock::given(method("GET"))
                .and(path("/v1/someSecretPath/someKey"))
                .and(header("X-Vault-Token", "someClientToken"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "lease_id": "",
                    "renewable": false,
                    "lease_duration": 2592000,
                    "data": {"value": "someValue", "user": "someUser"},
                    "auth": null
                })))
                .expect(2),
            Mock::given(method("GET"))
                .and(path("/v1/auth/token/revoke-self"))
                .and(header("X-Vault-Token", "someClientToken"))
                .respond_with(ResponseTemplate::new(204))
                .expect(1),
        ],
    );

    let mut token = VaultToken::new(&server.uri()).unwrap();
    token
        .read_token_from_login(&server.uri(), "someAppId", "someUserId")
        .unwrap();
    assert_eq!(token.token().unwrap().expose_secret(), "someClientToken");

    let client = VaultClient::new(&server.uri(), "/someSecretPath", token.token().unwrap()).unwrap();
    assert_eq!(client.read("someKey").unwrap().as_deref(), Some("someValue"));
    assert_eq!(client.read_field("someKey", "missing").unwrap(), None);

    token.revoke().unwrap();
    assert!(token.token().is_none());
}

#[test]
fn test_blocking_read_failure() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = start_server(
        &runtime,
        vec![Mock::given(method("GET"))
            .and(path("/v1/someSecretPath/someKey"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)],
    );

    let token = SecretString::new("someClientToken".to_string());
    let client = VaultClient::new(&server.uri(), "someSecretPath", &token).unwrap();
    let err = client.read("someKey").unwrap_err();

    assert!(matches!(err, Error::Read { status: 500, .. }));
    assert_eq!(
        err.to_string(),
        format!(
            "read of vault property 'someKey' with token 'someClientToken' from url \
             '{}/v1/someSecretPath/someKey' failed, return code is '500'",
            server.uri()
        )
    );
}

#[test]
fn test_blocking_revoke_failure() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = start_server(
        &runtime,
        vec![Mock::given(method("GET"))
            .and(path("/v1/auth/token/revoke-self"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)],
    );

    let mut token = VaultToken::new(&server.uri()).unwrap();
    token.set_token("someClientToken");

    let err = token.revoke().unwrap_err();
    assert_eq!(
        err.to_string(),
        "revoke of vault clientToken failed, return code is '503'"
    );
}

#[test]
fn test_blocking_url_for() {
    let token = SecretString::new("t".to_string());
    let client = VaultClient::new("http://someBaseUrl/", "/someSecretPath", &token).unwrap();
    assert_eq!(
        client.url_for("someKey"),
        "http://someBaseUrl/v1/someSecretPath/someKey"
    );
}
