//! Vault secret reader
//!
//! This module contains the [`VaultClient`] that reads secret documents from
//! `{base_url}/v1/{secret_path}/{key}` and extracts fields from their `data`
//! mapping.
//!
//! A client is bound at construction to one base URL, one secret path and one
//! token. To switch token, build a new client.
//!
//! # Examples
//!
//! ```no_run
//! use vault_reader_sdk::VaultClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = VaultClient::new("https://vault.example.com:8200", "/secret/myapp", "s.token")?;
//!
//! // The conventional "value" field
//! if let Some(password) = client.read("db-password").await? {
//!     println!("password has {} characters", password.len());
//! }
//!
//! // Any other field
//! let user = client.read_field("db-credentials", "username").await?;
//! # Ok(())
//! # }
//! ```

use crate::{
    config::VaultConfig,
    endpoints::Endpoints,
    errors::{Error, Result},
    models::{SecretDocument, DEFAULT_FIELD},
    util::{build_request, token_header_value, TOKEN_HEADER},
};
use reqwest::{Client as HttpClient, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::{
    collections::{BTreeMap, HashMap},
    time::Duration,
};
use tracing::{debug, warn};

/// Vault secret reader
#[derive(Clone)]
pub struct VaultClient {
    http: HttpClient,
    endpoints: Endpoints,
    token: SecretString,
}

impl std::fmt::Debug for VaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultClient")
            .field("endpoints", &self.endpoints)
            .field("token", &"****")
            .finish()
    }
}

impl VaultClient {
    /// Create a reader for `secret_path` under `base_url`, authenticating with `token`
    ///
    /// Leading and trailing slashes of either part are normalized, so
    /// `("http://host", "/path")` and `("http://host/", "path/")` address the
    /// same URLs.
    pub fn new(base_url: &str, secret_path: &str, token: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(crate::DEFAULT_TIMEOUT_MS))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_http(
            http,
            base_url,
            secret_path,
            SecretString::new(token.into()),
        ))
    }

    /// Create a reader from a validated configuration and an acquired token
    pub fn from_config(config: &VaultConfig, token: &SecretString) -> Result<Self> {
        Ok(Self::with_http(
            config.http_client()?,
            &config.base_url,
            &config.secret_path,
            token.clone(),
        ))
    }

    pub(crate) fn with_http(
        http: HttpClient,
        base_url: &str,
        secret_path: &str,
        token: SecretString,
    ) -> Self {
        Self {
            http,
            endpoints: Endpoints::new(base_url, secret_path),
            token,
        }
    }

    /// Full URL a key is read from
    pub fn url_for(&self, key: &str) -> String {
        self.endpoints.secret(key)
    }

    /// Read the `value` field of secret `key`
    ///
    /// Returns `Ok(None)` when the secret exists but has no `value` field.
    pub async fn read(&self, key: &str) -> Result<Option<String>> {
        self.read_field(key, DEFAULT_FIELD).await
    }

    /// Read field `field` of secret `key`
    ///
    /// Field names match exactly. A missing field is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// * `Error::Read` if the server answers anything but 200
    /// * `Error::Deserialize` if the body is not a secret document
    /// * `Error::Network` / `Error::Timeout` for transport failures
    pub async fn read_field(&self, key: &str, field: &str) -> Result<Option<String>> {
        let document = self.read_document(key).await?;
        let value = document.field(field);
        if value.is_none() {
            debug!(key, field, "vault secret has no such field");
        }
        Ok(value)
    }

    /// Read every field of secret `key`
    pub async fn read_fields(&self, key: &str) -> Result<HashMap<String, String>> {
        Ok(self.read_document(key).await?.fields())
    }

    /// Read the `value` field of several secrets
    ///
    /// Keys whose secret has no `value` field are left out of the result. The
    /// first failing read aborts the whole call.
    pub async fn read_properties<I, K>(&self, keys: I) -> Result<BTreeMap<String, String>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut properties = BTreeMap::new();
        for key in keys {
            let key = key.as_ref();
            if let Some(value) = self.read(key).await? {
                let _ = properties.insert(key.to_string(), value);
            }
        }
        Ok(properties)
    }

    /// Fetch and parse the secret document of `key`
    pub async fn read_document(&self, key: &str) -> Result<SecretDocument> {
        let url = self.endpoints.secret(key);
        let response = build_request(&self.http, Method::GET, &url)
            .header(TOKEN_HEADER, token_header_value(&self.token)?)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(key, status = status.as_u16(), "vault read rejected");
            return Err(Error::Read {
                key: key.to_string(),
                token: self.token.expose_secret().clone(),
                url,
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(Error::from)
    }
}
