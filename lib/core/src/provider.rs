//! The fixed catalogue of data-source providers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A third-party data source that can be connected through OAuth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Airtable,
    Notion,
    Hubspot,
}

impl Provider {
    /// Every provider, in the order the selector lists them.
    pub const ALL: [Provider; 3] = [Provider::Airtable, Provider::Notion, Provider::Hubspot];

    /// Returns the path segment used in backend URLs.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Airtable => "airtable",
            Self::Notion => "notion",
            Self::Hubspot => "hubspot",
        }
    }

    /// Returns the name written into integration parameters and shown in the UI.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Airtable => "Airtable",
            Self::Notion => "Notion",
            Self::Hubspot => "HubSpot",
        }
    }

    /// Returns the icon shown next to the provider.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Airtable => "📊",
            Self::Notion => "📝",
            Self::Hubspot => "👥",
        }
    }

    /// Returns the short description used in the selector.
    #[must_use]
    pub fn description(self) -> String {
        format!("Connect your {} account", self.display_name())
    }

    /// Looks up a provider by its display name (e.g. `"HubSpot"`).
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.display_name() == name)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when parsing a provider from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProviderError {
    /// The value that did not name a provider.
    pub value: String,
}

impl fmt::Display for ParseProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown integration provider '{}'", self.value)
    }
}

impl std::error::Error for ParseProviderError {}

impl FromStr for Provider {
    type Err = ParseProviderError;

    /// Parses a slug, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.slug() == lowered)
            .ok_or_else(|| ParseProviderError {
                value: s.to_string(),
            })
    }
}
