//! Client token acquisition and revocation
//!
//! A [`VaultToken`] owns at most one client token. The token comes from an
//! environment variable, a token file or an app-id login; a later acquisition
//! overwrites the earlier token without revoking it. [`VaultToken::revoke`]
//! invalidates the token on the server and clears it locally.
//!
//! # Example
//!
//! ```no_run
//! use vault_reader_sdk::VaultToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut token = VaultToken::new("https://vault.example.com:8200")?;
//! token
//!     .read_token_from_login("https://vault.example.com:8200", "my-app", "my-user")
//!     .await?;
//!
//! // ... read secrets ...
//!
//! token.revoke().await?;
//! # Ok(())
//! # }
//! ```

use crate::{
    config::{TokenSource, VaultConfig},
    endpoints::Endpoints,
    errors::{Error, Result},
    models::{LoginRequest, LoginResponse},
    util::{build_request, token_header_value, TOKEN_HEADER},
};
use reqwest::{Client as HttpClient, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::{path::Path, time::Duration};
use tracing::{info, warn};

/// Holder of the current client token
pub struct VaultToken {
    http: HttpClient,
    endpoints: Endpoints,
    token: Option<SecretString>,
}

impl std::fmt::Debug for VaultToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultToken")
            .field("base_url", &self.endpoints.base_url())
            .field("token", &self.token.as_ref().map(|_| "****"))
            .finish()
    }
}

impl VaultToken {
    /// Create an acquirer whose revoke calls go to `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(crate::DEFAULT_TIMEOUT_MS))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_http(http, base_url))
    }

    /// Create an acquirer from a validated configuration
    pub fn from_config(config: &VaultConfig) -> Result<Self> {
        Ok(Self::with_http(config.http_client()?, &config.base_url))
    }

    pub(crate) fn with_http(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            endpoints: Endpoints::new(base_url, ""),
            token: None,
        }
    }

    /// Current token, if one was acquired
    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// Replace the current token with one supplied out-of-band
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(SecretString::new(token.into()));
    }

    /// Obtain a token the way `config.token_source` says
    pub async fn acquire(&mut self, config: &VaultConfig) -> Result<()> {
        match config.token_source {
            TokenSource::Environment => self.read_token_from_env(&config.environment_token),
            TokenSource::File => self.read_token_from_file(&config.token_file),
            TokenSource::Login => {
                let (Some(app_id), Some(user_id)) = (&config.app_id, &config.user_id) else {
                    return Err(Error::Config(
                        "Login token source requires app_id and user_id".to_string(),
                    ));
                };
                self.read_token_from_login(
                    &config.base_url,
                    app_id.expose_secret(),
                    user_id.expose_secret(),
                )
                .await
            }
        }
    }

    /// Take the token from the environment variable `variable`
    ///
    /// # Errors
    ///
    /// * `Error::Config` if the variable is unset or not unicode; the current
    ///   token is left untouched
    pub fn read_token_from_env(&mut self, variable: &str) -> Result<()> {
        let value = std::env::var(variable).map_err(|e| {
            Error::Config(format!("environment variable '{}' is not usable: {}", variable, e))
        })?;
        self.token = Some(SecretString::new(value));
        info!(variable, "vault token read from environment");
        Ok(())
    }

    /// Take the token from a token file, ignoring surrounding whitespace
    ///
    /// # Errors
    ///
    /// * `Error::Io` if the file cannot be read
    /// * `Error::Config` if the file is empty
    pub fn read_token_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let token = contents.trim();
        if token.is_empty() {
            return Err(Error::Config(format!(
                "token file '{}' is empty",
                path.display()
            )));
        }
        self.token = Some(SecretString::new(token.to_string()));
        info!(path = %path.display(), "vault token read from file");
        Ok(())
    }

    /// Log in with app id and user id and keep the issued client token
    ///
    /// Sends `POST {base_url}/v1/auth/app-id/login`.
    ///
    /// # Errors
    ///
    /// * `Error::Authentication` if the server answers anything but 200
    /// * `Error::Deserialize` if the body lacks `auth.client_token`
    /// * `Error::Network` / `Error::Timeout` for transport failures
    pub async fn read_token_from_login(
        &mut self,
        base_url: &str,
        app_id: &str,
        user_id: &str,
    ) -> Result<()> {
        let url = Endpoints::new(base_url, "").login();
        let response = build_request(&self.http, Method::POST, &url)
            .json(&LoginRequest { app_id, user_id })
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "vault login rejected");
            return Err(Error::Authentication {
                status: status.as_u16(),
            });
        }

        let body: LoginResponse = response.json().await?;
        self.token = Some(SecretString::new(body.auth.client_token));
        info!(
            policies = ?body.auth.policies,
            lease_duration = body.auth.lease_duration,
            "vault login succeeded"
        );
        Ok(())
    }

    /// Revoke the current token on the server and forget it
    ///
    /// Sends `GET {base_url}/v1/auth/token/revoke-self`. The token is kept if
    /// revocation fails.
    ///
    /// # Errors
    ///
    /// * `Error::Config` if no token was acquired
    /// * `Error::Revocation` if the server answers anything but 204
    pub async fn revoke(&mut self) -> Result<()> {
        let token = self
            .token
            .as_ref()
            .ok_or_else(|| Error::Config("no vault client token to revoke".to_string()))?;

        let url = self.endpoints.revoke_self();
        let response = build_request(&self.http, Method::GET, &url)
            .header(TOKEN_HEADER, token_header_value(token)?)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            warn!(status = status.as_u16(), "vault token revocation rejected");
            return Err(Error::Revocation {
                status: status.as_u16(),
            });
        }

        self.token = None;
        info!("vault token revoked");
        Ok(())
    }
}
