//! Connector settings shared by the host server and the browser.
//!
//! The server loads these from its configuration and hands them to the
//! page through a server function, so every field has a serde default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How the `authorize` request body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizeEncoding {
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`, for form-parameter backends.
    Form,
}

/// HTTP method used for the `credentials` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialsMethod {
    /// Identifiers are sent as query parameters.
    #[default]
    Get,
    /// Identifiers are sent in the body, encoded like `authorize`.
    Post,
}

/// Settings for the connector flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorSettings {
    /// Interval between popup-closed checks, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Authorization popup width in pixels.
    #[serde(default = "default_popup_width")]
    pub popup_width: u32,

    /// Authorization popup height in pixels.
    #[serde(default = "default_popup_height")]
    pub popup_height: u32,

    #[serde(default)]
    pub authorize_encoding: AuthorizeEncoding,

    #[serde(default)]
    pub credentials_method: CredentialsMethod,

    /// Reject `connect()` when the user or organization ID is blank.
    #[serde(default = "default_require_identifiers")]
    pub require_identifiers: bool,

    /// Timeout for backend requests made outside the browser, in seconds.
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

fn default_poll_interval_ms() -> u64 {
    200
}

fn default_popup_width() -> u32 {
    800
}

fn default_popup_height() -> u32 {
    600
}

fn default_require_identifiers() -> bool {
    true
}

fn default_request_timeout_seconds() -> u64 {
    30
}

impl Default for ConnectorSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            popup_width: default_popup_width(),
            popup_height: default_popup_height(),
            authorize_encoding: AuthorizeEncoding::default(),
            credentials_method: CredentialsMethod::default(),
            require_identifiers: default_require_identifiers(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl ConnectorSettings {
    /// Returns the popup-closed poll period. Never shorter than 10ms.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(10))
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Returns the window features for the authorization popup.
    #[must_use]
    pub fn popup_features(&self) -> PopupFeatures {
        PopupFeatures {
            width: self.popup_width,
            height: self.popup_height,
        }
    }
}

/// Window features passed to `window.open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupFeatures {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for PopupFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "width={},height={}", self.width, self.height)
    }
}
