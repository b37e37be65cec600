//! Connector state machine and the OAuth connect flow.
//!
//! A connector walks `Idle → Authorizing → AwaitingPopupClose →
//! PollingCredentials → Connected`. Failures while authorizing or polling
//! land in `Error`, from which the user may retry. The async steps live on
//! [`ConnectFlow`] and are sequenced by [`ConnectAttempt`](crate::ConnectAttempt),
//! which feeds their results into [`ConnectorState`] as [`ConnectorEvent`]s.

use crate::backend::IntegrationBackend;
use crate::credentials::ConnectOutcome;
use crate::error::ConnectorError;
use crate::popup::{PopupOpener, PopupWatcher};
use crate::settings::ConnectorSettings;
use connect_hub_core::{Provider, SessionIdentity};

/// State of a single connector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectorState {
    #[default]
    Idle,
    Authorizing,
    AwaitingPopupClose,
    PollingCredentials,
    Connected,
    Error(String),
}

/// Something that happened during a connect attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorEvent {
    Started,
    PopupOpened,
    PopupClosed,
    CredentialsReceived,
    CredentialsAbsent,
    Failed(String),
}

impl ConnectorEvent {
    /// Maps a credential poll result to the event it produces.
    #[must_use]
    pub fn from_poll(result: &Result<Option<ConnectOutcome>, ConnectorError>) -> Self {
        match result {
            Ok(Some(_)) => Self::CredentialsReceived,
            Ok(None) => Self::CredentialsAbsent,
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// Status derived from the connector state, as the widget renders it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub is_loading: bool,
    pub error: String,
    pub is_connected: bool,
}

impl ConnectorState {
    /// Initial state for a freshly mounted connector.
    #[must_use]
    pub fn initial(already_connected: bool) -> Self {
        if already_connected {
            Self::Connected
        } else {
            Self::Idle
        }
    }

    /// Applies an event. Returns false if the event does not apply in the
    /// current state, in which case the state is unchanged.
    pub fn apply(&mut self, event: ConnectorEvent) -> bool {
        use ConnectorEvent as E;

        let next = match (&*self, event) {
            (Self::Idle | Self::Error(_) | Self::Connected, E::Started) => Self::Authorizing,
            (Self::Authorizing, E::PopupOpened) => Self::AwaitingPopupClose,
            (Self::AwaitingPopupClose, E::PopupClosed) => Self::PollingCredentials,
            (Self::PollingCredentials, E::CredentialsReceived) => Self::Connected,
            (Self::PollingCredentials, E::CredentialsAbsent) => Self::Idle,
            (Self::Authorizing | Self::PollingCredentials, E::Failed(message)) => {
                Self::Error(message)
            }
            (state, event) => {
                tracing::trace!(?state, ?event, "Ignoring connector event");
                return false;
            }
        };
        *self = next;
        true
    }

    /// Returns true if `connect()` may start from this state.
    #[must_use]
    pub fn can_connect(&self) -> bool {
        matches!(self, Self::Idle | Self::Error(_) | Self::Connected)
    }

    /// Returns the derived status.
    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        ConnectionStatus {
            is_loading: matches!(self, Self::Authorizing | Self::PollingCredentials),
            error: match self {
                Self::Error(message) => message.clone(),
                _ => String::new(),
            },
            is_connected: matches!(self, Self::Connected),
        }
    }
}

/// The async steps of connecting one provider.
pub struct ConnectFlow<B, O> {
    provider: Provider,
    pub(crate) backend: B,
    pub(crate) opener: O,
    settings: ConnectorSettings,
}

impl<B, O> ConnectFlow<B, O>
where
    B: IntegrationBackend,
    O: PopupOpener,
{
    /// Creates a connect flow for `provider`.
    #[must_use]
    pub fn new(provider: Provider, backend: B, opener: O, settings: ConnectorSettings) -> Self {
        Self {
            provider,
            backend,
            opener,
            settings,
        }
    }

    #[must_use]
    pub fn provider(&self) -> Provider {
        self.provider
    }

    #[must_use]
    pub fn settings(&self) -> &ConnectorSettings {
        &self.settings
    }

    /// Requests an authorization URL and opens it in a popup.
    ///
    /// Returns a watcher for the opened window.
    ///
    /// # Errors
    ///
    /// Returns an error if identifiers are required but blank, if the
    /// backend call fails or omits `url`, or if the popup is blocked. No
    /// window is opened in any error case.
    pub async fn begin(
        &self,
        identity: &SessionIdentity,
    ) -> Result<PopupWatcher<O::Window>, ConnectorError> {
        if self.settings.require_identifiers {
            let missing = identity.missing();
            if !missing.is_empty() {
                return Err(ConnectorError::MissingIdentifiers { fields: missing });
            }
        }

        let provider = self.provider;
        tracing::debug!(provider = %provider, user = %identity.user, org = %identity.org, "Requesting authorization URL");

        let response = self.backend.authorize(provider, identity).await?;
        let url = response
            .authorization_url()
            .ok_or_else(|| ConnectorError::MalformedResponse {
                endpoint: format!("/integrations/{}/authorize", provider.slug()),
                reason: "response did not include an authorization URL".to_string(),
            })?;

        let window = self.opener.open(url, &self.settings.popup_features())?;
        tracing::info!(provider = %provider, "Opened authorization window");

        Ok(PopupWatcher::new(window))
    }

    /// Asks the backend for credentials stored for `identity`.
    ///
    /// Returns `None` if the backend has none yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn poll_credentials(
        &self,
        identity: &SessionIdentity,
    ) -> Result<Option<ConnectOutcome>, ConnectorError> {
        let provider = self.provider;
        let response = self.backend.fetch_credentials(provider, identity).await?;

        match response.into_credentials() {
            Some(credentials) => {
                tracing::info!(provider = %provider, "Integration connected");
                Ok(Some(ConnectOutcome {
                    provider,
                    credentials,
                }))
            }
            None => {
                tracing::debug!(provider = %provider, "No credentials stored yet");
                Ok(None)
            }
        }
    }
}
