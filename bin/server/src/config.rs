//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables.
//!
//! See [`ConnectorSettings`] for the keys under `CONNECTOR__`.

use connect_hub_integration::ConnectorSettings;
use serde::Deserialize;
use std::time::Duration;

/// Server configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the integrations backend.
    pub backend_url: String,

    /// Timeout for forwarded backend requests, in seconds.
    #[serde(default = "default_forward_timeout_seconds")]
    pub forward_timeout_seconds: u64,

    /// Settings handed to the connector widgets.
    #[serde(default)]
    pub connector: ConnectorSettings,
}

fn default_forward_timeout_seconds() -> u64 {
    30
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(config::Environment::default())
    }

    fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    #[must_use]
    pub fn forward_timeout(&self) -> Duration {
        Duration::from_secs(self.forward_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connect_hub_integration::{AuthorizeEncoding, CredentialsMethod};

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, config::ConfigError> {
        let source = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        ServerConfig::from_environment(config::Environment::default().source(Some(source)))
    }

    #[test]
    fn backend_url_is_required() {
        assert!(load(&[]).is_err());
    }

    #[test]
    fn server_config_has_correct_defaults() {
        let config = load(&[("BACKEND_URL", "http://localhost:8000")]).expect("config");
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.forward_timeout(), Duration::from_secs(30));
        assert_eq!(config.connector, ConnectorSettings::default());
    }

    #[test]
    fn connector_settings_from_nested_keys() {
        let config = load(&[
            ("BACKEND_URL", "http://backend"),
            ("FORWARD_TIMEOUT_SECONDS", "5"),
            ("CONNECTOR__POLL_INTERVAL_MS", "500"),
            ("CONNECTOR__POPUP_WIDTH", "1024"),
            ("CONNECTOR__AUTHORIZE_ENCODING", "form"),
            ("CONNECTOR__CREDENTIALS_METHOD", "post"),
            ("CONNECTOR__REQUIRE_IDENTIFIERS", "false"),
            ("CONNECTOR__REQUEST_TIMEOUT_SECONDS", "10"),
        ])
        .expect("config");

        assert_eq!(config.forward_timeout_seconds, 5);
        assert_eq!(config.connector.poll_interval_ms, 500);
        assert_eq!(config.connector.popup_width, 1024);
        assert_eq!(config.connector.popup_height, 600);
        assert_eq!(config.connector.authorize_encoding, AuthorizeEncoding::Form);
        assert_eq!(config.connector.credentials_method, CredentialsMethod::Post);
        assert!(!config.connector.require_identifiers);
        assert_eq!(config.connector.request_timeout(), Duration::from_secs(10));
    }
}
