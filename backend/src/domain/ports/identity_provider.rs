//! Driven port for the managed identity service.
//!
//! Identities are created and verified by an external provider. Adapters
//! translate provider-specific failures into [`IdentityProviderError`] so the
//! authentication service can map them to user-visible notices.

use async_trait::async_trait;

use crate::domain::{Identity, LoginCredentials, ProviderToken, SignUpDetails};

use super::define_port_error;

define_port_error! {
    /// Failures reported by identity provider adapters.
    pub enum IdentityProviderError {
        /// Email/password pair did not match an account.
        InvalidCredentials => "invalid email or password",
        /// Sign-up used an email that already has an account.
        EmailInUse => "email address is already registered",
        /// The provider refused the request for another reason.
        Rejected { message: String } => "identity provider rejected the request: {message}",
        /// The provider could not be reached or answered with a server error.
        Unavailable { message: String } => "identity provider unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify an email/password pair.
    async fn sign_in(&self, credentials: &LoginCredentials)
    -> Result<Identity, IdentityProviderError>;

    /// Create a password account and return its identity.
    async fn sign_up(&self, details: &SignUpDetails) -> Result<Identity, IdentityProviderError>;

    /// Exchange a social provider token for an identity.
    async fn sign_in_with_provider(
        &self,
        token: &ProviderToken,
    ) -> Result<Identity, IdentityProviderError>;
}
