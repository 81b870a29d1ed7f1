//! Data models for the Vault reader SDK
//!
//! Request and response bodies of the three calls the SDK issues. Only
//! `data` of a secret document and `auth.client_token` of a login response are
//! consumed; the lease metadata is parsed so callers can inspect it.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Field read by [`VaultClient::read`](crate::VaultClient::read)
pub const DEFAULT_FIELD: &str = "value";

/// Response body of a secret read
///
/// # Example
///
/// ```
/// use vault_reader_sdk::SecretDocument;
///
/// let doc: SecretDocument = serde_json::from_str(
///     r#"{"lease_id":"","renewable":false,"lease_duration":2592000,
///         "data":{"value":"s3cr3t"},"auth":null}"#,
/// ).unwrap();
/// assert_eq!(doc.field("value").as_deref(), Some("s3cr3t"));
/// assert_eq!(doc.field("missing"), None);
/// ```
#[derive(Clone, Deserialize)]
pub struct SecretDocument {
    /// Lease identifier
    #[serde(default, deserialize_with = "null_as_default")]
    pub lease_id: String,
    /// Whether the lease can be renewed
    #[serde(default, deserialize_with = "null_as_default")]
    pub renewable: bool,
    /// Lease duration in seconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub lease_duration: u64,
    /// Field name to value mapping
    #[serde(default)]
    pub data: Option<HashMap<String, serde_json::Value>>,
}

impl SecretDocument {
    /// Look up a field by exact name
    ///
    /// String values are returned as-is; any other JSON value is returned in
    /// its JSON text form.
    pub fn field(&self, name: &str) -> Option<String> {
        self.data.as_ref()?.get(name).map(render)
    }

    /// All fields of the document, in the same text form as [`field`](Self::field)
    pub fn fields(&self) -> HashMap<String, String> {
        self.data
            .iter()
            .flatten()
            .map(|(name, value)| (name.clone(), render(value)))
            .collect()
    }
}

impl std::fmt::Debug for SecretDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.data.as_ref().map(|data| {
            let mut names: Vec<&str> = data.keys().map(String::as_str).collect();
            names.sort_unstable();
            names.into_iter().map(|name| (name, "****")).collect::<Vec<_>>()
        });
        f.debug_struct("SecretDocument")
            .field("lease_id", &self.lease_id)
            .field("renewable", &self.renewable)
            .field("lease_duration", &self.lease_duration)
            .field("data", &data)
            .finish()
    }
}

/// Lease metadata is informational; `null` reads as the default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn render(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Body of the app-id login call
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub app_id: &'a str,
    pub user_id: &'a str,
}

/// Response body of a login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Lease identifier
    #[serde(default, deserialize_with = "null_as_default")]
    pub lease_id: String,
    /// Whether the lease can be renewed
    #[serde(default, deserialize_with = "null_as_default")]
    pub renewable: bool,
    /// Lease duration in seconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub lease_duration: u64,
    /// Authentication block
    pub auth: LoginAuth,
}

/// `auth` object of a login response
#[derive(Clone, Deserialize)]
pub struct LoginAuth {
    /// Issued client token
    pub client_token: String,
    /// Policies attached to the token
    #[serde(default, deserialize_with = "null_as_default")]
    pub policies: Vec<String>,
    /// Token lease duration in seconds
    #[serde(default, deserialize_with = "null_as_default")]
    pub lease_duration: u64,
    /// Whether the token can be renewed
    #[serde(default, deserialize_with = "null_as_default")]
    pub renewable: bool,
    /// Auth backend metadata
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl std::fmt::Debug for LoginAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginAuth")
            .field("client_token", &"****")
            .field("policies", &self.policies)
            .field("lease_duration", &self.lease_duration)
            .field("renewable", &self.renewable)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_json(client_token: &str) -> String {
        format!(
            r#"{{
                "lease_id": "",
                "renewable": false,
                "lease_duration": 0,
                "data": null,
                "auth": {{
                    "client_token": "{}",
                    "policies": ["root"],
                    "lease_duration": 0,
                    "renewable": false,
                    "metadata": {{
                        "app-id": "sha1:1c0401b419280b0771d006bcdae683989086a00e",
                        "user-id": "sha1:4dbf74fce71648d54c42e28ad193253600853ca6"
                    }}
                }}
            }}"#,
            client_token
        )
    }

    #[test]
    fn test_login_response_deserialize() {
        let resp: LoginResponse = serde_json::from_str(&login_json("someClientToken")).unwrap();
        assert_eq!(resp.auth.client_token, "someClientToken");
        assert_eq!(resp.auth.policies, vec!["root".to_string()]);
        assert_eq!(resp.auth.metadata.len(), 2);
    }

    #[test]
    fn test_login_auth_debug_redacts_token() {
        let resp: LoginResponse = serde_json::from_str(&login_json("someClientToken")).unwrap();
        let debug_str = format!("{:?}", resp);
        assert!(!debug_str.contains("someClientToken"));
        assert!(debug_str.contains("****"));
    }

    #[test]
    fn test_secret_document_null_data() {
        let doc: SecretDocument =
            serde_json::from_str(r#"{"lease_id":"x","renewable":true,"lease_duration":1,"data":null,"auth":null}"#)
                .unwrap();
        assert_eq!(doc.field(DEFAULT_FIELD), None);
        assert!(doc.fields().is_empty());
    }

    #[test]
    fn test_secret_document_non_string_field() {
        let doc: SecretDocument =
            serde_json::from_str(r#"{"data":{"port":5432,"enabled":true,"value":"x"}}"#).unwrap();
        assert_eq!(doc.field("port").as_deref(), Some("5432"));
        assert_eq!(doc.field("enabled").as_deref(), Some("true"));
        assert_eq!(doc.fields().len(), 3);
    }

    #[test]
    fn test_field_lookup_is_exact() {
        let doc: SecretDocument = serde_json::from_str(r#"{"data":{"Value":"upper"}}"#).unwrap();
        assert_eq!(doc.field("value"), None);
        assert_eq!(doc.field("Value").as_deref(), Some("upper"));
    }

    #[test]
    fn test_null_lease_metadata_is_tolerated() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"lease_id":null,"renewable":null,"lease_duration":null,"data":null,
                "auth":{"client_token":"someClientToken","policies":null,
                        "lease_duration":null,"renewable":null,"metadata":null}}"#,
        )
        .unwrap();
        assert_eq!(resp.auth.client_token, "someClientToken");
        assert!(resp.auth.policies.is_empty());
        assert!(resp.auth.metadata.is_empty());

        let doc: SecretDocument = serde_json::from_str(
            r#"{"lease_id":null,"renewable":null,"lease_duration":null,"data":{"value":"x"}}"#,
        )
        .unwrap();
        assert_eq!(doc.lease_id, "");
        assert_eq!(doc.field(DEFAULT_FIELD).as_deref(), Some("x"));
    }

    #[test]
    fn test_login_metadata_accepts_any_json() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"auth":{"client_token":"t","metadata":{"ttl":3600,"tags":["a"],"owner":"ops"}}}"#,
        )
        .unwrap();
        assert_eq!(resp.auth.metadata["ttl"], serde_json::json!(3600));
        assert_eq!(resp.auth.metadata["owner"], serde_json::json!("ops"));
    }

    #[test]
    fn test_secret_document_debug_redacts_values() {
        let doc: SecretDocument = serde_json::from_str(
            r#"{"lease_id":"lease-1","data":{"value":"hunter2","username":"admin"}}"#,
        )
        .unwrap();
        let debug_str = format!("{:?}", doc);
        assert!(!debug_str.contains("hunter2"));
        assert!(!debug_str.contains("admin"));
        assert!(debug_str.contains("value"));
        assert!(debug_str.contains("username"));
        assert!(debug_str.contains("****"));
        assert!(debug_str.contains("lease-1"));
    }

    #[test]
    fn test_login_request_body() {
        let body = serde_json::to_value(LoginRequest {
            app_id: "someAppId",
            user_id: "someUserId",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"app_id": "someAppId", "user_id": "someUserId"})
        );
    }
}
