use crate::{errors::Result, Error};
use reqwest::Client as HttpClient;
use secrecy::SecretString;
use std::{path::PathBuf, str::FromStr, time::Duration};
use tracing::warn;

const USER_AGENT_PREFIX: &str = "vault-reader-sdk-rust";

/// Where [`VaultToken::acquire`](crate::VaultToken::acquire) obtains the client token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// App-id login against the vault
    Login,
    /// A pre-provisioned token in an environment variable
    Environment,
    /// A token file such as `~/.vault-token`
    File,
}

impl FromStr for TokenSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "login" => Ok(TokenSource::Login),
            "environment" | "env" => Ok(TokenSource::Environment),
            "file" => Ok(TokenSource::File),
            other => Err(Error::Config(format!("unknown token source '{}'", other))),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Base URL of the vault, without trailing slash
    pub base_url: String,
    /// Path prefix under `/v1` that groups the secrets
    pub secret_path: String,
    /// How the client token is obtained
    pub token_source: TokenSource,
    /// Environment variable holding a pre-provisioned token
    pub environment_token: String,
    /// App id for login
    pub app_id: Option<SecretString>,
    /// User id for login
    pub user_id: Option<SecretString>,
    /// Token file for [`TokenSource::File`]
    pub token_file: PathBuf,
    /// Request timeout
    pub timeout: Duration,
    /// User agent suffix
    pub user_agent_suffix: Option<String>,
}

impl VaultConfig {
    /// Build the HTTP client shared by token and secret calls
    pub(crate) fn http_client(&self) -> Result<HttpClient> {
        let user_agent = if let Some(suffix) = &self.user_agent_suffix {
            format!("{}/{} {}", USER_AGENT_PREFIX, crate::VERSION, suffix)
        } else {
            format!("{}/{}", USER_AGENT_PREFIX, crate::VERSION)
        };

        HttpClient::builder()
            .user_agent(user_agent)
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
    }
}

/// Builder for creating a validated [`VaultConfig`]
///
/// # Example
///
/// ```
/// use vault_reader_sdk::{TokenSource, VaultConfigBuilder};
///
/// let config = VaultConfigBuilder::new("https://vault.example.com:8200/")
///     .secret_path("/secret/myapp")
///     .token_source(TokenSource::Login)
///     .app_id("my-app")
///     .user_id("my-user")
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url, "https://vault.example.com:8200");
/// ```
#[derive(Debug)]
pub struct VaultConfigBuilder {
    base_url: String,
    secret_path: String,
    token_source: TokenSource,
    environment_token: String,
    app_id: Option<SecretString>,
    user_id: Option<SecretString>,
    token_file: Option<PathBuf>,
    timeout_ms: u64,
    user_agent_suffix: Option<String>,
}

impl VaultConfigBuilder {
    /// Create a new builder with the given base URL
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the vault (e.g., `"https://vault.example.com:8200"`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            secret_path: String::new(),
            token_source: TokenSource::Environment,
            environment_token: crate::DEFAULT_TOKEN_ENV_VAR.to_string(),
            app_id: None,
            user_id: None,
            token_file: None,
            timeout_ms: crate::DEFAULT_TIMEOUT_MS,
            user_agent_suffix: None,
        }
    }

    /// Set the secret path prefix
    pub fn secret_path(mut self, secret_path: impl Into<String>) -> Self {
        self.secret_path = secret_path.into();
        self
    }

    /// Set the token source (default: [`TokenSource::Environment`])
    pub fn token_source(mut self, source: TokenSource) -> Self {
        self.token_source = source;
        self
    }

    /// Set the environment variable checked for a token (default: `VAULT_TOKEN`)
    pub fn environment_token(mut self, variable: impl Into<String>) -> Self {
        self.environment_token = variable.into();
        self
    }

    /// Set the app id used for login
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(SecretString::new(app_id.into()));
        self
    }

    /// Set the user id used for login
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(SecretString::new(user_id.into()));
        self
    }

    /// Set the token file (default: `$HOME/.vault-token`)
    pub fn token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = Some(path.into());
        self
    }

    /// Set the request timeout in milliseconds
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Add a custom user agent suffix
    pub fn user_agent_extra(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<VaultConfig> {
        let url = crate::endpoints::normalize_base_url(&self.base_url);

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config("Base URL must start with http:// or https://".to_string()));
        }
        if url.starts_with("http://") {
            warn!(base_url = %url, "vault base URL is plain http, tokens travel unencrypted");
        }

        match self.token_source {
            TokenSource::Login if self.app_id.is_none() || self.user_id.is_none() => {
                return Err(Error::Config(
                    "Login token source requires app_id and user_id".to_string(),
                ));
            }
            TokenSource::Environment if self.environment_token.trim().is_empty() => {
                return Err(Error::Config(
                    "Environment token source requires a variable name".to_string(),
                ));
            }
            _ => {}
        }

        let token_file = match (self.token_file, default_token_file()) {
            (Some(path), _) | (None, Some(path)) => path,
            (None, None) if self.token_source == TokenSource::File => {
                return Err(Error::Config(
                    "HOME is not set, use .token_file() to locate the token file".to_string(),
                ));
            }
            (None, None) => PathBuf::from(".vault-token"),
        };

        Ok(VaultConfig {
            base_url: url,
            secret_path: crate::endpoints::normalize_secret_path(&self.secret_path),
            token_source: self.token_source,
            environment_token: self.environment_token,
            app_id: self.app_id,
            user_id: self.user_id,
            token_file,
            timeout: Duration::from_millis(self.timeout_ms),
            user_agent_suffix: self.user_agent_suffix,
        })
    }
}

fn default_token_file() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".vault-token"))
}
