//! Core domain types and utilities for connect-hub.
//!
//! This crate provides the provider catalogue, the identifiers a person
//! supplies when connecting an integration, and the shared `Result` alias.

pub mod error;
pub mod id;
pub mod provider;

pub use error::Result;
pub use id::{OrgId, SessionIdentity, UserId};
pub use provider::{ParseProviderError, Provider};
