//! Backend trait for the integrations HTTP API.
//!
//! The backend performs the provider token exchange server-side and stores
//! credentials keyed by `(org, user)`. The connector only asks it for an
//! authorization URL and, later, for whatever credentials it has stored.

use crate::credentials::{Credentials, IntegrationItem};
use crate::error::ConnectorError;
use async_trait::async_trait;
use connect_hub_core::{Provider, SessionIdentity};
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Response of `POST /integrations/{provider}/authorize`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthorizeResponse {
    #[serde(default)]
    pub url: Option<String>,
}

impl AuthorizeResponse {
    /// Returns the authorization URL exactly as sent, unless absent or
    /// blank.
    #[must_use]
    pub fn authorization_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// Response of the `credentials` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CredentialsResponse {
    #[serde(default)]
    pub credentials: Option<JsonValue>,
}

impl CredentialsResponse {
    /// Returns the credentials if the backend has a completed exchange.
    #[must_use]
    pub fn into_credentials(self) -> Option<Credentials> {
        self.credentials.and_then(Credentials::from_value)
    }
}

/// Trait for the integrations backend.
///
/// Futures are not `Send` on wasm32, where requests go through `fetch`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait IntegrationBackend {
    /// Requests an authorization URL for the given identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    async fn authorize(
        &self,
        provider: Provider,
        identity: &SessionIdentity,
    ) -> Result<AuthorizeResponse, ConnectorError>;

    /// Fetches credentials stored for the given identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    /// Missing credentials are not an error.
    async fn fetch_credentials(
        &self,
        provider: Provider,
        identity: &SessionIdentity,
    ) -> Result<CredentialsResponse, ConnectorError>;

    /// Loads the provider's items using previously obtained credentials.
    async fn load_items(
        &self,
        provider: Provider,
        credentials: &Credentials,
    ) -> Result<Vec<IntegrationItem>, ConnectorError>;
}

/// Extracts a human-readable failure detail from an error response body.
///
/// Understands `{"detail": "..."}`, FastAPI validation lists
/// (`{"detail": [{"msg": "..."}]}`), `{"error": "..."}` and
/// `{"message": "..."}`.
#[must_use]
pub fn error_detail(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    if let Some(detail) = object.get("detail") {
        match detail {
            JsonValue::String(text) if !text.trim().is_empty() => return Some(text.clone()),
            JsonValue::Array(entries) => {
                let messages: Vec<&str> = entries
                    .iter()
                    .filter_map(|entry| entry.get("msg").and_then(JsonValue::as_str))
                    .collect();
                if !messages.is_empty() {
                    return Some(messages.join("; "));
                }
            }
            _ => {}
        }
    }

    ["error", "message"].into_iter().find_map(|key| {
        object
            .get(key)
            .and_then(JsonValue::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn authorization_url_rejects_blank() {
        let response: AuthorizeResponse = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(response.authorization_url(), None);

        let response = AuthorizeResponse {
            url: Some("  ".to_string()),
        };
        assert_eq!(response.authorization_url(), None);

        let response = AuthorizeResponse {
            url: Some("https://provider.example/oauth?state=abc".to_string()),
        };
        assert_eq!(
            response.authorization_url(),
            Some("https://provider.example/oauth?state=abc")
        );
    }

    #[test]
    fn authorization_url_is_not_rewritten() {
        let response = AuthorizeResponse {
            url: Some("https://provider.example/oauth?redirect=a%20b ".to_string()),
        };
        assert_eq!(
            response.authorization_url(),
            Some("https://provider.example/oauth?redirect=a%20b ")
        );
    }

    #[test]
    fn credentials_response_empty_cases() {
        let absent: CredentialsResponse = serde_json::from_str("{}").expect("deserialize");
        assert!(absent.into_credentials().is_none());

        let null: CredentialsResponse =
            serde_json::from_str(r#"{"credentials": null}"#).expect("deserialize");
        assert!(null.into_credentials().is_none());

        let present: CredentialsResponse =
            serde_json::from_str(r#"{"credentials": {"access_token": "t1"}}"#)
                .expect("deserialize");
        let creds = present.into_credentials().expect("credentials");
        assert_eq!(creds.get("access_token"), Some(&json!("t1")));
    }

    #[test]
    fn detail_string() {
        assert_eq!(
            error_detail(r#"{"detail": "No credentials found."}"#).as_deref(),
            Some("No credentials found.")
        );
    }

    #[test]
    fn detail_validation_list() {
        let body = json!({"detail": [
            {"loc": ["body", "user_id"], "msg": "field required"},
            {"loc": ["body", "org_id"], "msg": "field required"}
        ]})
        .to_string();
        assert_eq!(
            error_detail(&body).as_deref(),
            Some("field required; field required")
        );
    }

    #[test]
    fn detail_fallback_keys() {
        assert_eq!(
            error_detail(r#"{"error": "invalid_grant"}"#).as_deref(),
            Some("invalid_grant")
        );
        assert_eq!(
            error_detail(r#"{"message": "rate limited"}"#).as_deref(),
            Some("rate limited")
        );
    }

    #[test]
    fn detail_absent() {
        assert_eq!(error_detail("Internal Server Error"), None);
        assert_eq!(error_detail(r#"{"detail": ""}"#), None);
        assert_eq!(error_detail("[]"), None);
    }
}
