//! Error types for the integration crate.
//!
//! Every variant is terminal for the current connect attempt only. The
//! `Display` output is what the connector shows inline, so it must be
//! safe and readable for the person at the keyboard.

use std::fmt;

/// Errors from a connector attempt or a backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    /// Required identifiers were blank when `connect()` was called.
    MissingIdentifiers { fields: Vec<&'static str> },
    /// The backend could not be reached.
    Transport { endpoint: String, reason: String },
    /// The backend answered successfully but without the expected shape.
    MalformedResponse { endpoint: String, reason: String },
    /// The backend reported a failure.
    Backend { status: u16, detail: Option<String> },
    /// The browser refused to open the authorization window.
    PopupBlocked,
    /// Stored parameters name an integration type no provider matches.
    UnknownIntegrationType { value: String },
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIdentifiers { fields } => {
                let ids = fields
                    .iter()
                    .map(|field| format!("{field} ID"))
                    .collect::<Vec<_>>()
                    .join(" and ");
                if fields.len() > 1 {
                    write!(f, "{ids} are required")
                } else {
                    write!(f, "{ids} is required")
                }
            }
            Self::Transport { endpoint, reason } => {
                write!(f, "could not reach {endpoint}: {reason}")
            }
            Self::MalformedResponse { endpoint, reason } => {
                write!(f, "unexpected response from {endpoint}: {reason}")
            }
            Self::Backend {
                detail: Some(detail),
                ..
            } => f.write_str(detail),
            Self::Backend {
                status,
                detail: None,
            } => write!(f, "request failed with status {status}"),
            Self::PopupBlocked => write!(
                f,
                "the authorization window was blocked; allow popups for this site and try again"
            ),
            Self::UnknownIntegrationType { value } => {
                write!(f, "unknown integration type '{value}'")
            }
        }
    }
}

impl std::error::Error for ConnectorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_identifiers_display() {
        let err = ConnectorError::MissingIdentifiers {
            fields: vec!["user", "organization"],
        };
        assert_eq!(err.to_string(), "user ID and organization ID are required");

        let err = ConnectorError::MissingIdentifiers {
            fields: vec!["organization"],
        };
        assert_eq!(err.to_string(), "organization ID is required");
    }

    #[test]
    fn backend_detail_is_shown_verbatim() {
        let err = ConnectorError::Backend {
            status: 400,
            detail: Some("State does not match.".to_string()),
        };
        assert_eq!(err.to_string(), "State does not match.");
    }

    #[test]
    fn backend_without_detail_mentions_status() {
        let err = ConnectorError::Backend {
            status: 500,
            detail: None,
        };
        assert_eq!(err.to_string(), "request failed with status 500");
    }

    #[test]
    fn transport_display() {
        let err = ConnectorError::Transport {
            endpoint: "/integrations/notion/authorize".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("/integrations/notion/authorize"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn unknown_integration_type_names_the_value() {
        let err = ConnectorError::UnknownIntegrationType {
            value: "Salesforce".to_string(),
        };
        assert_eq!(err.to_string(), "unknown integration type 'Salesforce'");
    }
}
