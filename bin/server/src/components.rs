//! Reusable UI components.

pub mod connector;
pub mod data_form;

pub use connector::Connector;
pub use data_form::DataForm;

use connect_hub_integration::{ConnectorError, ConnectorSettings, HttpBackend};

/// Backend client rooted at the page origin.
///
/// The host server forwards `/integrations/*` to the real backend.
///
/// # Errors
///
/// Returns an error outside the browser, or if the client cannot be built.
pub fn page_backend(settings: ConnectorSettings) -> Result<HttpBackend, ConnectorError> {
    #[cfg(feature = "hydrate")]
    let origin = crate::browser::origin();
    #[cfg(not(feature = "hydrate"))]
    let origin: Option<String> = None;

    let origin = origin.ok_or_else(|| ConnectorError::Transport {
        endpoint: "/integrations".to_string(),
        reason: "page origin is unavailable".to_string(),
    })?;
    HttpBackend::new(origin, settings)
}
