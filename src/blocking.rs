//! Blocking facade over the async client
//!
//! Every call drives the async operation to completion on a private
//! current-thread runtime and returns its result directly. Do not call these
//! from inside an async runtime; use [`crate::VaultToken`] and
//! [`crate::VaultClient`] there instead.
//!
//! # Example
//!
//! ```no_run
//! use vault_reader_sdk::blocking::{VaultClient, VaultToken};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut token = VaultToken::new("https://vault.example.com:8200")?;
//! token.read_token_from_env("VAULT_TOKEN")?;
//!
//! let client = VaultClient::new(
//!     "https://vault.example.com:8200",
//!     "/secret/myapp",
//!     token.token().ok_or("no token")?,
//! )?;
//! let password = client.read("db-password")?;
//!
//! token.revoke()?;
//! # Ok(())
//! # }
//! ```

use crate::{
    config::VaultConfig,
    errors::{Error, Result},
    models::SecretDocument,
};
use secrecy::{ExposeSecret, SecretString};
use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
    sync::Arc,
};
use tokio::runtime::Runtime;

fn new_runtime() -> Result<Arc<Runtime>> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map(Arc::new)
        .map_err(|e| Error::Config(format!("Failed to build runtime: {}", e)))
}

/// Blocking [`crate::VaultToken`]
#[derive(Debug)]
pub struct VaultToken {
    inner: crate::VaultToken,
    runtime: Arc<Runtime>,
}

impl VaultToken {
    /// Create an acquirer whose revoke calls go to `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            inner: crate::VaultToken::new(base_url)?,
            runtime: new_runtime()?,
        })
    }

    /// Create an acquirer from a validated configuration
    pub fn from_config(config: &VaultConfig) -> Result<Self> {
        Ok(Self {
            inner: crate::VaultToken::from_config(config)?,
            runtime: new_runtime()?,
        })
    }

    /// Current token, if one was acquired
    pub fn token(&self) -> Option<&SecretString> {
        self.inner.token()
    }

    /// Replace the current token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.inner.set_token(token)
    }

    /// See [`crate::VaultToken::acquire`]
    pub fn acquire(&mut self, config: &VaultConfig) -> Result<()> {
        self.runtime.block_on(self.inner.acquire(config))
    }

    /// See [`crate::VaultToken::read_token_from_env`]
    pub fn read_token_from_env(&mut self, variable: &str) -> Result<()> {
        self.inner.read_token_from_env(variable)
    }

    /// See [`crate::VaultToken::read_token_from_file`]
    pub fn read_token_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.inner.read_token_from_file(path)
    }

    /// See [`crate::VaultToken::read_token_from_login`]
    pub fn read_token_from_login(&mut self, base_url: &str, app_id: &str, user_id: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.read_token_from_login(base_url, app_id, user_id))
    }

    /// See [`crate::VaultToken::revoke`]
    pub fn revoke(&mut self) -> Result<()> {
        self.runtime.block_on(self.inner.revoke())
    }
}

/// Blocking [`crate::VaultClient`]
#[derive(Debug, Clone)]
pub struct VaultClient {
    inner: crate::VaultClient,
    runtime: Arc<Runtime>,
}

impl VaultClient {
    /// Create a reader for `secret_path` under `base_url`, authenticating with `token`
    pub fn new(base_url: &str, secret_path: &str, token: &SecretString) -> Result<Self> {
        Ok(Self {
            inner: crate::VaultClient::new(base_url, secret_path, token.expose_secret().clone())?,
            runtime: new_runtime()?,
        })
    }

    /// Create a reader from a validated configuration and an acquired token
    pub fn from_config(config: &VaultConfig, token: &SecretString) -> Result<Self> {
        Ok(Self {
            inner: crate::VaultClient::from_config(config, token)?,
            runtime: new_runtime()?,
        })
    }

    /// Full URL a key is read from
    pub fn url_for(&self, key: &str) -> String {
        self.inner.url_for(key)
    }

    /// See [`crate::VaultClient::read`]
    pub fn read(&self, key: &str) -> Result<Option<String>> {
        self.runtime.block_on(self.inner.read(key))
    }

    /// See [`crate::VaultClient::read_field`]
    pub fn read_field(&self, key: &str, field: &str) -> Result<Option<String>> {
        self.runtime.block_on(self.inner.read_field(key, field))
    }

    /// See [`crate::VaultClient::read_fields`]
    pub fn read_fields(&self, key: &str) -> Result<HashMap<String, String>> {
        self.runtime.block_on(self.inner.read_fields(key))
    }

    /// See [`crate::VaultClient::read_properties`]
    pub fn read_properties<I, K>(&self, keys: I) -> Result<BTreeMap<String, String>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.runtime.block_on(self.inner.read_properties(keys))
    }

    /// See [`crate::VaultClient::read_document`]
    pub fn read_document(&self, key: &str) -> Result<SecretDocument> {
        self.runtime.block_on(self.inner.read_document(key))
    }
}
