//! Error types and handling for the Vault reader SDK
//!
//! This module defines the error types that can be returned by SDK operations.
//! The three vault-facing failures (login, read, revoke) carry the HTTP status
//! and the request details as structured fields, and render the exact message
//! text that existing log matchers expect.
//!
//! # Error Categories
//!
//! - **Authentication**: login call answered with a status other than 200
//! - **Read**: secret read answered with a status other than 200
//! - **Revocation**: revoke-self answered with a status other than 204
//! - **Configuration**: invalid configuration or a missing token source
//! - **Transport**: connection failures, timeouts and undecodable bodies
//!
//! # Example
//!
//! ```no_run
//! # use vault_reader_sdk::{VaultClient, Error};
//! # async fn example(client: &VaultClient) -> Result<(), Box<dyn std::error::Error>> {
//! match client.read("database-password").await {
//!     Ok(Some(value)) => println!("got {} bytes", value.len()),
//!     Ok(None) => println!("secret has no 'value' field"),
//!     Err(Error::Read { status: 403, .. }) => println!("token not allowed to read"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Result type alias for the SDK
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the SDK
#[derive(Error, Debug)]
pub enum Error {
    /// Login returned a status other than 200
    #[error("login to vault failed, return code is {status}")]
    Authentication {
        /// HTTP status code
        status: u16,
    },

    /// Secret read returned a status other than 200
    #[error("read of vault property '{key}' with token '{token}' from url '{url}' failed, return code is '{status}'")]
    Read {
        /// Requested secret key
        key: String,
        /// Token the request was sent with
        token: String,
        /// Full request URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Token revocation returned a status other than 204
    #[error("revoke of vault clientToken failed, return code is '{status}'")]
    Revocation {
        /// HTTP status code
        status: u16,
    },

    /// Deserialization error
    #[error("deserialize: {0}")]
    Deserialize(String),

    /// Network error
    #[error("network: {0}")]
    Network(String),

    /// Request timeout
    #[error("timeout")]
    Timeout,

    /// Configuration error
    #[error("config: {0}")]
    Config(String),

    /// Reading a token file failed
    #[error("io: {0}")]
    Io(String),

    /// Other errors
    #[error("other: {0}")]
    Other(String),
}

/// Coarse error categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Login rejected
    Authentication,
    /// Secret read rejected
    Read,
    /// Token revocation rejected
    Revocation,
    /// Configuration error
    Config,
    /// Network, timeout, decoding and IO failures
    Transport,
    /// Other/unknown error
    Other,
}

impl Error {
    /// Get the error kind for categorization
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Authentication { .. } => ErrorKind::Authentication,
            Error::Read { .. } => ErrorKind::Read,
            Error::Revocation { .. } => ErrorKind::Revocation,
            Error::Config(_) => ErrorKind::Config,
            Error::Network(_) | Error::Timeout | Error::Deserialize(_) | Error::Io(_) => {
                ErrorKind::Transport
            }
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Get the HTTP status code if the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Authentication { status }
            | Error::Read { status, .. }
            | Error::Revocation { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_connect() || err.is_request() {
            Error::Network(err.to_string())
        } else if err.is_decode() {
            Error::Deserialize(err.to_string())
        } else {
            Error::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Deserialize(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
