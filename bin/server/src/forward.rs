//! Forwards `/integrations/{provider}/{action}` to the integrations backend.
//!
//! The page only ever talks to this server. Method, query string,
//! `content-type` and body go through unchanged; status, `content-type`
//! and body come back unchanged.

use crate::error::{ForwardError, backend_unavailable};
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Extension, Path, RawQuery};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use connect_hub_core::{Provider, Result};
use std::time::Duration;

/// Backend actions reachable through the forwarder.
pub const FORWARDED_ACTIONS: [&str; 3] = ["authorize", "credentials", "load"];

/// Shared client for the integrations backend.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    backend_url: String,
}

impl Forwarder {
    /// Creates a forwarder for the backend at `backend_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(backend_url: impl Into<String>, timeout: Duration) -> Result<Self, ForwardError> {
        let backend_url = backend_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ForwardError::Client {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            backend_url,
        })
    }

    fn target(&self, provider: Provider, action: &str, query: Option<&str>) -> String {
        let mut url = format!(
            "{}/integrations/{}/{action}",
            self.backend_url,
            provider.slug()
        );
        if let Some(query) = query.filter(|query| !query.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    async fn send(
        &self,
        provider: Provider,
        action: &str,
        method: Method,
        query: Option<&str>,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<Response, ForwardError> {
        let url = self.target(provider, action, query);

        let mut request = self.client.request(method.clone(), &url).body(body);
        if let Some(content_type) = headers.get(CONTENT_TYPE) {
            request = request.header(CONTENT_TYPE, content_type.clone());
        }

        let upstream = request.send().await.map_err(|e| ForwardError::Upstream {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let status = upstream.status();
        let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
        let body = upstream.bytes().await.map_err(|e| ForwardError::Upstream {
            url: url.clone(),
            reason: format!("failed to read response body: {e}"),
        })?;

        tracing::debug!(%method, %url, status = status.as_u16(), "Forwarded backend request");

        let mut response = (status, body).into_response();
        if let Some(content_type) = content_type {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Ok(response)
    }
}

/// Handler for `ANY /integrations/{provider}/{action}`.
pub async fn forward(
    Extension(forwarder): Extension<Forwarder>,
    Path((provider_slug, action)): Path<(String, String)>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let provider = match provider_slug.parse::<Provider>() {
        Ok(provider) if FORWARDED_ACTIONS.contains(&action.as_str()) => provider,
        _ => {
            return ForwardError::UnknownRoute {
                provider: provider_slug,
                action,
            }
            .into_response();
        }
    };

    match forwarder
        .send(provider, &action, method, query.as_deref(), &headers, body)
        .await
    {
        Ok(response) => response,
        Err(report) => {
            tracing::warn!(provider = %provider, %action, error = %report, "Backend request failed");
            backend_unavailable()
        }
    }
}

/// Routes served by the forwarder. Requires an `Extension<Forwarder>` layer.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/integrations/{provider}/{action}", any(forward))
}
