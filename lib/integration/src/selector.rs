//! The integration selector form.
//!
//! The form is the single owner of the identifiers, the selected provider
//! and the integration parameters. Connectors never write parameters
//! directly; they hand a [`ConnectOutcome`] back and the form merges it.

use crate::credentials::{ConnectOutcome, Credentials, IntegrationParams};
use crate::error::ConnectorError;
use connect_hub_core::{OrgId, Provider, SessionIdentity, UserId};

/// Identifiers the form is seeded with.
pub const DEFAULT_USER_ID: &str = "TestUser";
pub const DEFAULT_ORG_ID: &str = "TestOrg";

/// State of the selector page.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorForm {
    user: UserId,
    org: OrgId,
    selected: Option<Provider>,
    params: IntegrationParams,
}

impl Default for SelectorForm {
    fn default() -> Self {
        Self::new(SessionIdentity::new(DEFAULT_USER_ID, DEFAULT_ORG_ID))
    }
}

/// Inputs of the data form, present once credentials exist.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFormProps {
    /// `None` if `integration_type` is not a known display name.
    pub provider: Option<Provider>,
    pub integration_type: String,
    pub credentials: Credentials,
}

impl DataFormProps {
    /// Returns the provider whose `load` endpoint serves this data.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::UnknownIntegrationType`] if the stored
    /// type matches no provider.
    pub fn load_provider(&self) -> Result<Provider, ConnectorError> {
        self.provider
            .ok_or_else(|| ConnectorError::UnknownIntegrationType {
                value: self.integration_type.clone(),
            })
    }
}

/// Inputs of a connector widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorProps {
    pub provider: Provider,
    pub identity: SessionIdentity,
    pub starts_connected: bool,
}

impl SelectorForm {
    #[must_use]
    pub fn new(identity: SessionIdentity) -> Self {
        Self {
            user: identity.user,
            org: identity.org,
            selected: None,
            params: IntegrationParams::default(),
        }
    }

    /// Replaces the user ID. Any text is accepted.
    pub fn set_user(&mut self, value: impl Into<UserId>) {
        self.user = value.into();
    }

    /// Replaces the organization ID. Any text is accepted.
    pub fn set_org(&mut self, value: impl Into<OrgId>) {
        self.org = value.into();
    }

    /// Selects a provider, or clears the selection with `None`.
    ///
    /// Parameters from an earlier connection are kept.
    pub fn select(&mut self, provider: Option<Provider>) {
        if self.selected != provider {
            tracing::debug!(?provider, "Integration selection changed");
        }
        self.selected = provider;
    }

    #[must_use]
    pub fn selected(&self) -> Option<Provider> {
        self.selected
    }

    #[must_use]
    pub fn user(&self) -> &UserId {
        &self.user
    }

    #[must_use]
    pub fn org(&self) -> &OrgId {
        &self.org
    }

    /// Returns the identity passed to connectors.
    #[must_use]
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            user: self.user.clone(),
            org: self.org.clone(),
        }
    }

    #[must_use]
    pub fn params(&self) -> &IntegrationParams {
        &self.params
    }

    /// Merges a connector's outcome into the parameters.
    pub fn apply_outcome(&mut self, outcome: ConnectOutcome) {
        tracing::info!(provider = %outcome.provider, "Credentials stored in integration parameters");
        self.params.apply(outcome);
    }

    /// Returns true if a connector for `provider` should mount connected.
    #[must_use]
    pub fn starts_connected(&self, provider: Provider) -> bool {
        self.params.connected_provider() == Some(provider)
    }

    /// Returns the inputs for mounting the connector of `provider`.
    #[must_use]
    pub fn connector_props(&self, provider: Provider) -> ConnectorProps {
        ConnectorProps {
            provider,
            identity: self.identity(),
            starts_connected: self.starts_connected(provider),
        }
    }

    /// Returns the data form inputs once credentials are held.
    ///
    /// The data form follows the stored integration type, not the
    /// selection.
    #[must_use]
    pub fn data_form_props(&self) -> Option<DataFormProps> {
        let credentials = self.params.credentials.clone()?;
        Some(DataFormProps {
            provider: self.params.connected_provider(),
            integration_type: self.params.integration_type.clone().unwrap_or_default(),
            credentials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outcome(provider: Provider, token: &str) -> ConnectOutcome {
        ConnectOutcome {
            provider,
            credentials: Credentials::from_value(json!({"access_token": token}))
                .expect("credentials"),
        }
    }

    #[test]
    fn defaults_to_test_identity_and_no_selection() {
        let form = SelectorForm::default();
        assert_eq!(form.identity(), SessionIdentity::new("TestUser", "TestOrg"));
        assert_eq!(form.selected(), None);
        assert!(!form.params().has_credentials());
        assert!(form.data_form_props().is_none());
    }

    #[test]
    fn identifiers_accept_any_text() {
        let mut form = SelectorForm::default();
        form.set_user("");
        form.set_org("  org with spaces ");
        assert_eq!(form.user().as_str(), "");
        assert_eq!(form.org().as_str(), "  org with spaces ");
        assert_eq!(form.identity().missing(), vec!["user"]);
    }

    #[test]
    fn selection_can_be_cleared() {
        let mut form = SelectorForm::default();
        form.select(Some(Provider::Notion));
        assert_eq!(form.selected(), Some(Provider::Notion));
        form.select(None);
        assert_eq!(form.selected(), None);
    }

    #[test]
    fn outcome_enables_data_form_for_selected_provider() {
        let mut form = SelectorForm::default();
        form.select(Some(Provider::Hubspot));
        form.apply_outcome(outcome(Provider::Hubspot, "t1"));

        let props = form.data_form_props().expect("data form");
        assert_eq!(props.provider, Some(Provider::Hubspot));
        assert_eq!(props.load_provider(), Ok(Provider::Hubspot));
        assert_eq!(props.integration_type, "HubSpot");
        assert_eq!(props.credentials.get("access_token"), Some(&json!("t1")));
    }

    #[test]
    fn switching_provider_keeps_params() {
        let mut form = SelectorForm::default();
        form.select(Some(Provider::Hubspot));
        form.apply_outcome(outcome(Provider::Hubspot, "t1"));

        form.select(Some(Provider::Notion));
        assert!(form.params().has_credentials());
        assert!(!form.starts_connected(Provider::Notion));
        assert_eq!(
            form.data_form_props().and_then(|props| props.provider),
            Some(Provider::Hubspot)
        );

        form.select(None);
        assert!(form.data_form_props().is_some());
    }

    #[test]
    fn connector_props_carry_current_identity() {
        let mut form = SelectorForm::default();
        form.set_user("u1");
        form.set_org("o1");
        form.apply_outcome(outcome(Provider::Notion, "n"));

        let props = form.connector_props(Provider::Notion);
        assert_eq!(props.identity, SessionIdentity::new("u1", "o1"));
        assert!(props.starts_connected);
        assert!(!form.connector_props(Provider::Hubspot).starts_connected);
    }

    #[test]
    fn credentials_alone_enable_data_form() {
        let mut form = SelectorForm::default();
        form.params = serde_json::from_value(json!({
            "type": "Salesforce",
            "credentials": {"access_token": "s"},
        }))
        .expect("params");

        let props = form.data_form_props().expect("data form");
        assert_eq!(props.provider, None);
        assert_eq!(props.integration_type, "Salesforce");
        assert_eq!(
            props.load_provider(),
            Err(ConnectorError::UnknownIntegrationType {
                value: "Salesforce".to_string()
            })
        );
        assert!(!form.starts_connected(Provider::Hubspot));
    }

    #[test]
    fn new_outcome_replaces_previous_provider() {
        let mut form = SelectorForm::default();
        form.apply_outcome(outcome(Provider::Airtable, "a"));
        form.apply_outcome(outcome(Provider::Notion, "n"));

        assert!(form.starts_connected(Provider::Notion));
        assert!(!form.starts_connected(Provider::Airtable));
    }
}
