//! Error types for the backend forwarder.
//!
//! Responses carry user-safe messages only; details go to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// Errors from forwarding a request to the integrations backend.
#[derive(Debug)]
pub enum ForwardError {
    /// The provider or action is not one the page may reach.
    UnknownRoute { provider: String, action: String },
    /// The HTTP client could not be built.
    Client { reason: String },
    /// The backend could not be reached or its response could not be read.
    Upstream { url: String, reason: String },
}

impl fmt::Display for ForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRoute { provider, action } => {
                write!(f, "no forwarded route for '{provider}/{action}'")
            }
            Self::Client { reason } => write!(f, "failed to build backend client: {reason}"),
            Self::Upstream { url, reason } => {
                write!(f, "backend request to {url} failed: {reason}")
            }
        }
    }
}

impl std::error::Error for ForwardError {}

/// Response sent when the backend cannot be reached.
#[must_use]
pub fn backend_unavailable() -> Response {
    (StatusCode::BAD_GATEWAY, "Backend unavailable").into_response()
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        match self {
            Self::UnknownRoute { .. } => {
                tracing::debug!(error = %self, "Rejected forward request");
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
            Self::Client { .. } | Self::Upstream { .. } => {
                tracing::warn!(error = %self, "Backend request failed");
                backend_unavailable()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_route_is_not_found() {
        let response = ForwardError::UnknownRoute {
            provider: "salesforce".to_string(),
            action: "authorize".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_failure_is_bad_gateway() {
        let err = ForwardError::Upstream {
            url: "http://backend/integrations/notion/load".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
