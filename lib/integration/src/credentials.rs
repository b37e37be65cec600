//! Credentials and the integration parameters that carry them downstream.
//!
//! Credentials are provider-specific token material. The UI never looks
//! inside them; it only needs to know whether they exist.

use connect_hub_core::Provider;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Opaque credential object returned by the backend once OAuth completes.
///
/// Always a non-empty JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(Map<String, JsonValue>);

impl Credentials {
    /// Interprets a raw `credentials` value from the backend.
    ///
    /// Returns `None` for `null`, `{}`, empty strings and non-object values.
    /// A string holding a JSON object is unwrapped, since some backends
    /// return the stored token blob without decoding it.
    #[must_use]
    pub fn from_value(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(map) if !map.is_empty() => Some(Self(map)),
            JsonValue::String(raw) if !raw.trim().is_empty() => {
                match serde_json::from_str::<JsonValue>(&raw) {
                    Ok(JsonValue::Object(map)) if !map.is_empty() => Some(Self(map)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Returns a field of the credential object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Converts the credentials back into a JSON value.
    #[must_use]
    pub fn into_value(self) -> JsonValue {
        JsonValue::Object(self.0)
    }
}

/// The immutable result a connector hands back to the selector form.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectOutcome {
    pub provider: Provider,
    pub credentials: Credentials,
}

impl ConnectOutcome {
    /// Returns the value written into `IntegrationParams::integration_type`.
    #[must_use]
    pub fn integration_type(&self) -> &'static str {
        self.provider.display_name()
    }
}

/// Parameters handed to the data configuration form.
///
/// Unknown keys are kept in `extra` so merging an outcome never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationParams {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub integration_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl IntegrationParams {
    /// Merges a connect outcome, keeping every other key.
    pub fn apply(&mut self, outcome: ConnectOutcome) {
        self.integration_type = Some(outcome.integration_type().to_string());
        self.credentials = Some(outcome.credentials);
    }

    /// Returns true once credentials have been observed.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Returns the provider whose credentials are held, if any.
    #[must_use]
    pub fn connected_provider(&self) -> Option<Provider> {
        self.credentials.as_ref()?;
        self.integration_type
            .as_deref()
            .and_then(Provider::from_display_name)
    }
}

/// An entity returned by the backend `load` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default, alias = "parent_path_or_name")]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub creation_time: Option<String>,
    #[serde(default)]
    pub last_modified_time: Option<String>,
    #[serde(default)]
    pub properties: Option<JsonValue>,
}

impl IntegrationItem {
    /// Returns the name, falling back to the id.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token(value: &str) -> Credentials {
        Credentials::from_value(json!({"access_token": value})).expect("non-empty")
    }

    #[test]
    fn empty_values_are_not_credentials() {
        assert!(Credentials::from_value(JsonValue::Null).is_none());
        assert!(Credentials::from_value(json!({})).is_none());
        assert!(Credentials::from_value(json!("")).is_none());
        assert!(Credentials::from_value(json!([1, 2])).is_none());
        assert!(Credentials::from_value(json!(true)).is_none());
    }

    #[test]
    fn object_credentials_are_kept_verbatim() {
        let creds = token("t1");
        assert_eq!(creds.get("access_token"), Some(&json!("t1")));
        assert_eq!(creds.into_value(), json!({"access_token": "t1"}));
    }

    #[test]
    fn json_string_credentials_are_unwrapped() {
        let creds = Credentials::from_value(json!("{\"access_token\":\"t2\"}"))
            .expect("string holding an object");
        assert_eq!(creds.get("access_token"), Some(&json!("t2")));

        assert!(Credentials::from_value(json!("not json")).is_none());
        assert!(Credentials::from_value(json!("{}")).is_none());
    }

    #[test]
    fn apply_merges_without_dropping_other_keys() {
        let mut params: IntegrationParams =
            serde_json::from_value(json!({"workspace": "w1"})).expect("deserialize");

        params.apply(ConnectOutcome {
            provider: Provider::Hubspot,
            credentials: token("t1"),
        });

        assert_eq!(
            serde_json::to_value(&params).expect("serialize"),
            json!({
                "workspace": "w1",
                "credentials": {"access_token": "t1"},
                "type": "HubSpot",
            })
        );
    }

    #[test]
    fn apply_replaces_previous_provider() {
        let mut params = IntegrationParams::default();
        params.apply(ConnectOutcome {
            provider: Provider::Notion,
            credentials: token("n"),
        });
        params.apply(ConnectOutcome {
            provider: Provider::Airtable,
            credentials: token("a"),
        });

        assert_eq!(params.integration_type.as_deref(), Some("Airtable"));
        assert_eq!(params.connected_provider(), Some(Provider::Airtable));
        assert_eq!(
            params.credentials.as_ref().and_then(|c| c.get("access_token")),
            Some(&json!("a"))
        );
    }

    #[test]
    fn connected_provider_requires_credentials() {
        let params = IntegrationParams {
            integration_type: Some("HubSpot".to_string()),
            ..Default::default()
        };
        assert!(!params.has_credentials());
        assert_eq!(params.connected_provider(), None);
    }

    #[test]
    fn item_label_falls_back_to_id() {
        let item: IntegrationItem =
            serde_json::from_value(json!({"id": "101", "name": "  "})).expect("deserialize");
        assert_eq!(item.label(), "101");

        let item: IntegrationItem = serde_json::from_value(
            json!({"id": "7", "name": "Jane Doe", "type": "contact", "parent_path_or_name": "CRM"}),
        )
        .expect("deserialize");
        assert_eq!(item.label(), "Jane Doe");
        assert_eq!(item.item_type.as_deref(), Some("contact"));
        assert_eq!(item.parent_name.as_deref(), Some("CRM"));
    }
}
