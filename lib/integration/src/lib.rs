//! Integration framework for connect-hub.
//!
//! This crate provides:
//!
//! - **Connector flow**: authorize, open the consent popup, watch for it to
//!   close, then poll for credentials
//! - **Backend client**: the `authorize` / `credentials` / `load` HTTP calls
//! - **Selector model**: the form that owns identifiers and integration
//!   parameters

pub mod attempt;
pub mod backend;
pub mod connector;
pub mod credentials;
pub mod error;
pub mod http;
pub mod popup;
pub mod selector;
pub mod settings;

pub use attempt::{CancelHandle, ConnectAttempt, TickAction};
pub use backend::{AuthorizeResponse, CredentialsResponse, IntegrationBackend};
pub use connector::{ConnectFlow, ConnectionStatus, ConnectorEvent, ConnectorState};
pub use credentials::{ConnectOutcome, Credentials, IntegrationItem, IntegrationParams};
pub use error::ConnectorError;
pub use http::HttpBackend;
pub use popup::{PopupOpener, PopupWatcher, PopupWindow, WatchTick};
pub use selector::{ConnectorProps, DataFormProps, SelectorForm};
pub use settings::{AuthorizeEncoding, ConnectorSettings, CredentialsMethod, PopupFeatures};
