//! Vault reader SDK for Rust
//!
//! A small client for a Vault-style secret service: obtain a client token,
//! read secret fields by key, and revoke the token on shutdown.
//!
//! # Features
//!
//! - Token from an environment variable, a token file or an app-id login
//! - Field extraction from secret documents with explicit present/absent results
//! - Async API on tokio, plus a blocking facade (`blocking` feature, on by default)
//! - Tokens redacted from `Debug` output and marked sensitive in request headers
//!
//! # Example
//!
//! ```no_run
//! use vault_reader_sdk::{TokenSource, VaultClient, VaultConfigBuilder, VaultToken};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = VaultConfigBuilder::new("https://vault.example.com:8200")
//!         .secret_path("secret/myapp")
//!         .token_source(TokenSource::Login)
//!         .app_id("my-app")
//!         .user_id("my-user")
//!         .build()?;
//!
//!     let mut token = VaultToken::from_config(&config)?;
//!     token.acquire(&config).await?;
//!
//!     let client = VaultClient::from_config(&config, token.token().ok_or("no token")?)?;
//!     let password = client.read("db-password").await?;
//!     println!("password present: {}", password.is_some());
//!
//!     token.revoke().await?;
//!     Ok(())
//! }
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    unsafe_code,
    unused_results
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Blocking facade over the async client
#[cfg(feature = "blocking")]
pub mod blocking;
mod client;
mod config;
mod endpoints;
mod errors;
mod models;
mod token;
mod util;

pub use client::VaultClient;
pub use config::{TokenSource, VaultConfig, VaultConfigBuilder};
pub use errors::{Error, ErrorKind, Result};
pub use models::*;
pub use token::VaultToken;

// Re-export commonly used types
pub use secrecy::{ExposeSecret, SecretString};

/// SDK version, matches Cargo.toml version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default environment variable holding a pre-provisioned token
pub const DEFAULT_TOKEN_ENV_VAR: &str = "VAULT_TOKEN";
