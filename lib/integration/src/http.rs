//! reqwest implementation of [`IntegrationBackend`].
//!
//! Runs natively and on wasm32, where reqwest goes through `fetch`. In the
//! browser the base URL is the page origin and the host server forwards
//! `/integrations/*` to the real backend.

use crate::backend::{AuthorizeResponse, CredentialsResponse, IntegrationBackend, error_detail};
use crate::credentials::{Credentials, IntegrationItem};
use crate::error::ConnectorError;
use crate::settings::{AuthorizeEncoding, ConnectorSettings, CredentialsMethod};
use async_trait::async_trait;
use connect_hub_core::{Provider, SessionIdentity};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identifier pair as the backend expects it.
#[derive(Debug, Serialize)]
struct IdentityParams<'a> {
    user_id: &'a str,
    org_id: &'a str,
}

impl<'a> From<&'a SessionIdentity> for IdentityParams<'a> {
    fn from(identity: &'a SessionIdentity) -> Self {
        Self {
            user_id: identity.user.as_str(),
            org_id: identity.org.as_str(),
        }
    }
}

/// `load` accepts either a bare list or a wrapped one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemsResponse {
    List(Vec<IntegrationItem>),
    Wrapped { items: Vec<IntegrationItem> },
}

impl From<ItemsResponse> for Vec<IntegrationItem> {
    fn from(response: ItemsResponse) -> Self {
        match response {
            ItemsResponse::List(items) | ItemsResponse::Wrapped { items } => items,
        }
    }
}

/// HTTP client for the integrations backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    settings: ConnectorSettings,
}

impl HttpBackend {
    /// Creates a backend client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        settings: ConnectorSettings,
    ) -> Result<Self, ConnectorError> {
        let base_url = base_url.into();
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(settings.request_timeout());

        let client = builder.build().map_err(|e| ConnectorError::Transport {
            endpoint: base_url.clone(),
            reason: format!("HTTP client error: {e}"),
        })?;

        Ok(Self {
            client,
            base_url,
            settings,
        })
    }

    fn endpoint(&self, provider: Provider, action: &str) -> String {
        format!(
            "{}/integrations/{}/{}",
            self.base_url.trim_end_matches('/'),
            provider.slug(),
            action
        )
    }

    fn with_body<T: Serialize + ?Sized>(
        &self,
        request: reqwest::RequestBuilder,
        body: &T,
    ) -> reqwest::RequestBuilder {
        match self.settings.authorize_encoding {
            AuthorizeEncoding::Json => request.json(body),
            AuthorizeEncoding::Form => request.form(body),
        }
    }

    /// Sends a request and returns the body of a successful response.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<String, ConnectorError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(error = %e, endpoint = %endpoint, "Backend request failed");
            ConnectorError::Transport {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ConnectorError::Transport {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        if !status.is_success() {
            tracing::debug!(
                endpoint = %endpoint,
                status = %status,
                body = %body,
                "Backend returned error"
            );
            return Err(ConnectorError::Backend {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        Ok(body)
    }

    fn parse<T: DeserializeOwned>(body: &str, endpoint: &str) -> Result<T, ConnectorError> {
        serde_json::from_str(body).map_err(|e| ConnectorError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl IntegrationBackend for HttpBackend {
    async fn authorize(
        &self,
        provider: Provider,
        identity: &SessionIdentity,
    ) -> Result<AuthorizeResponse, ConnectorError> {
        let endpoint = self.endpoint(provider, "authorize");
        let request = self.with_body(
            self.client.post(&endpoint),
            &IdentityParams::from(identity),
        );
        let body = self.send(request, &endpoint).await?;
        Self::parse(&body, &endpoint)
    }

    async fn fetch_credentials(
        &self,
        provider: Provider,
        identity: &SessionIdentity,
    ) -> Result<CredentialsResponse, ConnectorError> {
        let endpoint = self.endpoint(provider, "credentials");
        let params = IdentityParams::from(identity);
        let request = match self.settings.credentials_method {
            CredentialsMethod::Get => self.client.get(&endpoint).query(&params),
            CredentialsMethod::Post => self.with_body(self.client.post(&endpoint), &params),
        };
        let body = self.send(request, &endpoint).await?;

        // A bare `null` means nothing is stored yet.
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(CredentialsResponse::default());
        }
        Self::parse(trimmed, &endpoint)
    }

    async fn load_items(
        &self,
        provider: Provider,
        credentials: &Credentials,
    ) -> Result<Vec<IntegrationItem>, ConnectorError> {
        let endpoint = self.endpoint(provider, "load");
        let request = match self.settings.authorize_encoding {
            AuthorizeEncoding::Json => self
                .client
                .post(&endpoint)
                .json(&serde_json::json!({ "credentials": credentials })),
            AuthorizeEncoding::Form => {
                let encoded = serde_json::to_string(credentials).map_err(|e| {
                    ConnectorError::MalformedResponse {
                        endpoint: endpoint.clone(),
                        reason: format!("could not encode credentials: {e}"),
                    }
                })?;
                self.client
                    .post(&endpoint)
                    .form(&[("credentials", encoded)])
            }
        };
        let body = self.send(request, &endpoint).await?;
        Self::parse::<ItemsResponse>(&body, &endpoint).map(Into::into)
    }
}
