//! Driving port for sign-in and sign-up use-cases.
//!
//! Inbound adapters call this port to turn validated credentials into an
//! [`Identity`] without knowing which identity provider backs it.

use async_trait::async_trait;

use crate::domain::{Error, Identity, LoginCredentials, ProviderToken, SignUpDetails};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Sign in with email and password.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<Identity, Error>;

    /// Create a password account and sign it in.
    async fn sign_up(&self, details: &SignUpDetails) -> Result<Identity, Error>;

    /// Sign in with a social provider token.
    async fn sign_in_with_provider(&self, token: &ProviderToken) -> Result<Identity, Error>;
}
