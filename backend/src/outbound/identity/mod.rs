//! Identity provider outbound adapters.
//!
//! This module provides a reqwest implementation of the `IdentityProvider`
//! port against the managed identity service's REST API.

mod dto;
mod http_provider;

pub use http_provider::{IdentityHttpProvider, IdentityServiceSettings};
