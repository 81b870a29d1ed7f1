//! Utility functions

use reqwest::{Client as HttpClient, Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Vault token header
pub const TOKEN_HEADER: http::HeaderName = http::HeaderName::from_static("x-vault-token");

/// Generate a new request ID
pub fn generate_request_id() -> String {
    format!("sdk-{}", uuid::Uuid::new_v4())
}

/// Build a request with common headers
pub fn build_request(http: &HttpClient, method: Method, url: &str) -> RequestBuilder {
    let request_id = generate_request_id();
    debug!(%method, url, request_id = %request_id, "vault request");
    http.request(method, url).header("X-Request-ID", request_id)
}

/// URL encode a secret key, keeping `/` so nested keys address sub-paths
pub fn encode_path(s: &str) -> String {
    use percent_encoding::{AsciiSet, CONTROLS};

    const SEGMENT: &AsciiSet = &CONTROLS
        .add(b' ')
        .add(b'"')
        .add(b'<')
        .add(b'>')
        .add(b'`')
        .add(b'#')
        .add(b'?')
        .add(b'{')
        .add(b'}')
        .add(b'%');

    percent_encoding::utf8_percent_encode(s, SEGMENT).to_string()
}

/// Build an `X-Vault-Token` header value, marked sensitive so it is never logged
pub fn token_header_value(token: &SecretString) -> crate::Result<http::HeaderValue> {
    let mut value = http::HeaderValue::from_str(token.expose_secret())
        .map_err(|_| crate::Error::Config("client token contains invalid header characters".to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}
