//! Identifiers supplied by the person configuring an integration.
//!
//! The backend keys authorization state and stored credentials by
//! `(org, user)`. Both values are free text: the form never rejects them,
//! and only the connector decides whether a blank value is acceptable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate a free-text identifier wrapper.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string-like value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the identifier is empty or only whitespace.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// Returns the human-readable name of this kind of identifier.
            #[must_use]
            pub const fn label() -> &'static str {
                $label
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of the user connecting an integration.
    UserId,
    "user"
);

define_id!(
    /// Identifier of the organization the user belongs to.
    OrgId,
    "organization"
);

/// The `(user, org)` pair sent with every backend request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user: UserId,
    pub org: OrgId,
}

impl SessionIdentity {
    /// Creates a session identity.
    #[must_use]
    pub fn new(user: impl Into<UserId>, org: impl Into<OrgId>) -> Self {
        Self {
            user: user.into(),
            org: org.into(),
        }
    }

    /// Returns the labels of identifiers that are blank, in form order.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.user.is_blank() {
            missing.push(UserId::label());
        }
        if self.org.is_blank() {
            missing.push(OrgId::label());
        }
        missing
    }
}
