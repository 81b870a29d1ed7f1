//! API endpoint URL construction
//!
//! Every URL is `{base_url}/v1/...` with exactly one `/` between parts: the
//! base URL loses its trailing slashes and the secret path loses leading and
//! trailing slashes before joining.

use crate::util::encode_path;

/// API version prefix
pub const API_V1_BASE: &str = "/v1";

/// Endpoint builder
#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: String,
    secret_path: String,
}

impl Endpoints {
    /// Create a new endpoints builder
    pub fn new(base_url: &str, secret_path: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            secret_path: normalize_secret_path(secret_path),
        }
    }

    /// Get the full URL for a path
    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_V1_BASE, path)
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Auth
    /// App-id login URL
    pub fn login(&self) -> String {
        self.url("/auth/app-id/login")
    }

    /// Token self-revocation URL
    pub fn revoke_self(&self) -> String {
        self.url("/auth/token/revoke-self")
    }

    // Secrets
    /// URL of secret `key` under the secret path
    pub fn secret(&self, key: &str) -> String {
        let key = encode_path(key.trim_start_matches('/'));
        if self.secret_path.is_empty() {
            self.url(&format!("/{}", key))
        } else {
            self.url(&format!("/{}/{}", self.secret_path, key))
        }
    }
}

pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

pub(crate) fn normalize_secret_path(secret_path: &str) -> String {
    secret_path.trim().trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_endpoints() {
        let endpoints = Endpoints::new("http://someBaseUrl", "/someSecretPath");

        assert_eq!(
            endpoints.secret("someKey"),
            "http://someBaseUrl/v1/someSecretPath/someKey"
        );
        assert_eq!(endpoints.login(), "http://someBaseUrl/v1/auth/app-id/login");
        assert_eq!(
            endpoints.revoke_self(),
            "http://someBaseUrl/v1/auth/token/revoke-self"
        );
    }

    #[test]
    fn test_slash_combinations_agree() {
        let expected = "http://someBaseUrl/v1/someSecretPath/someKey";
        for base in ["http://someBaseUrl", "http://someBaseUrl/"] {
            for path in ["someSecretPath", "/someSecretPath", "someSecretPath/", "/someSecretPath/"] {
                assert_eq!(Endpoints::new(base, path).secret("someKey"), expected);
            }
        }
    }

    #[test]
    fn test_nested_secret_path() {
        let endpoints = Endpoints::new("https://vault.example.com:8200/", "/secret/team/app/");
        assert_eq!(
            endpoints.secret("db"),
            "https://vault.example.com:8200/v1/secret/team/app/db"
        );
    }

    #[test]
    fn test_empty_secret_path() {
        let endpoints = Endpoints::new("http://someBaseUrl", "/");
        assert_eq!(endpoints.secret("someKey"), "http://someBaseUrl/v1/someKey");
    }
}
