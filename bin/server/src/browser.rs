//! Browser window handling for the connect flow.

use connect_hub_core::{Provider, SessionIdentity};
use connect_hub_integration::{
    ConnectAttempt, ConnectFlow, ConnectorError, ConnectorSettings, HttpBackend, PopupFeatures,
    PopupOpener, PopupWindow,
};

/// Connect attempt as it runs in the page.
pub type BrowserAttempt = ConnectAttempt<HttpBackend, BrowserPopupOpener>;

/// An authorization window opened with `window.open`.
pub struct BrowserPopup {
    window: web_sys::Window,
}

impl PopupWindow for BrowserPopup {
    fn is_closed(&self) -> bool {
        // A window we can no longer inspect is as good as closed.
        self.window.closed().unwrap_or(true)
    }
}

/// Opens authorization windows in new browser windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPopupOpener;

impl PopupOpener for BrowserPopupOpener {
    type Window = BrowserPopup;

    fn open(&self, url: &str, features: &PopupFeatures) -> Result<BrowserPopup, ConnectorError> {
        let window = web_sys::window().ok_or(ConnectorError::PopupBlocked)?;
        match window.open_with_url_and_target_and_features(url, "_blank", &features.to_string()) {
            Ok(Some(popup)) => Ok(BrowserPopup { window: popup }),
            Ok(None) | Err(_) => Err(ConnectorError::PopupBlocked),
        }
    }
}

/// Returns the page origin, e.g. `http://127.0.0.1:3000`.
#[must_use]
pub fn origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

/// Builds a connect attempt for `provider` against the page origin.
///
/// # Errors
///
/// Returns an error if the page origin is unavailable or the HTTP client
/// cannot be built.
pub fn connect_attempt(
    provider: Provider,
    identity: SessionIdentity,
    settings: ConnectorSettings,
) -> Result<BrowserAttempt, ConnectorError> {
    let backend = crate::components::page_backend(settings.clone())?;
    let flow = ConnectFlow::new(provider, backend, BrowserPopupOpener, settings);
    Ok(ConnectAttempt::new(flow, identity))
}
