//! Authentication service implementing the [`Authenticator`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{Authenticator, IdentityProvider, IdentityProviderError};
use crate::domain::{Error, Identity, LoginCredentials, ProviderToken, SignUpDetails};

/// Notice for rejected credentials.
pub const AUTH_FAILED: &str = "Authentication failed. Please try again.";
/// Notice for sign-up with a registered email.
pub const EMAIL_IN_USE: &str = "This email is already registered. Please sign in instead.";
/// Notice for provider outages.
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong. Please try again.";
/// Notice for any failed social sign-in.
pub const SOCIAL_SIGN_IN_FAILED: &str = "Google sign-in failed. Please try again.";

fn map_provider_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::InvalidCredentials => Error::unauthorized(AUTH_FAILED),
        IdentityProviderError::EmailInUse => Error::conflict(EMAIL_IN_USE),
        IdentityProviderError::Rejected { message } => {
            warn!(%message, "identity provider rejected request");
            Error::unauthorized(AUTH_FAILED)
        }
        IdentityProviderError::Unavailable { message } => {
            warn!(%message, "identity provider unavailable");
            Error::service_unavailable(SOMETHING_WENT_WRONG)
        }
    }
}

/// Delegates authentication to an [`IdentityProvider`].
#[derive(Clone)]
pub struct AuthService<P> {
    provider: Arc<P>,
}

impl<P> AuthService<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P> Authenticator for AuthService<P>
where
    P: IdentityProvider,
{
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        self.provider
            .sign_in(credentials)
            .await
            .map_err(map_provider_error)
    }

    async fn sign_up(&self, details: &SignUpDetails) -> Result<Identity, Error> {
        self.provider
            .sign_up(details)
            .await
            .map_err(map_provider_error)
    }

    async fn sign_in_with_provider(&self, token: &ProviderToken) -> Result<Identity, Error> {
        self.provider
            .sign_in_with_provider(token)
            .await
            .map_err(|error| {
                let mapped = map_provider_error(error);
                Error::new(mapped.code(), SOCIAL_SIGN_IN_FAILED)
            })
    }
}
