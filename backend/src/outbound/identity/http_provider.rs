//! Reqwest-backed identity provider adapter.
//!
//! This adapter owns transport details only: endpoint construction, API key
//! placement, HTTP error mapping, and JSON decoding into domain identities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::dto::{
    AccountResponseDto, ErrorEnvelopeDto, IdpRequestDto, PasswordRequestDto,
    ProfileUpdateRequestDto,
};
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{
    DisplayName, Email, Identity, LoginCredentials, ProviderToken, SignUpDetails,
};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_IDP_REQUEST_URI: &str = "http://localhost";

/// Reasons the service uses for a wrong email/password pair.
const CREDENTIAL_REASONS: [&str; 4] = [
    "INVALID_PASSWORD",
    "EMAIL_NOT_FOUND",
    "INVALID_LOGIN_CREDENTIALS",
    "USER_DISABLED",
];
const EMAIL_EXISTS: &str = "EMAIL_EXISTS";

/// Connection settings for the identity service.
#[derive(Clone)]
pub struct IdentityServiceSettings {
    /// Base URL, e.g. `https://identitytoolkit.googleapis.com/v1/`.
    pub base_url: Url,
    /// Web API key appended as `?key=`.
    pub api_key: Zeroizing<String>,
    /// `requestUri` sent with id-token exchanges.
    pub idp_request_uri: String,
    pub timeout: Duration,
}

impl IdentityServiceSettings {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: Zeroizing::new(api_key.into()),
            idp_request_uri: DEFAULT_IDP_REQUEST_URI.to_owned(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Identity provider adapter that talks to the `accounts:*` REST endpoints.
pub struct IdentityHttpProvider {
    client: Client,
    base_url: Url,
    api_key: Zeroizing<String>,
    idp_request_uri: String,
}

impl IdentityHttpProvider {
    /// Build an adapter using a reqwest client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: IdentityServiceSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            base_url: settings.base_url,
            api_key: settings.api_key,
            idp_request_uri: settings.idp_request_uri,
        })
    }

    fn endpoint(&self, operation: &str) -> Result<Url, IdentityProviderError> {
        account_endpoint(&self.base_url, operation)
    }

    async fn call<B: Serialize + ?Sized>(
        &self,
        operation: &str,
        body: &B,
    ) -> Result<AccountResponseDto, IdentityProviderError> {
        let response = self
            .client
            .post(self.endpoint(operation)?)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let error = map_status_error(status, bytes.as_ref());
            debug!(operation, status = status.as_u16(), %error, "identity call failed");
            return Err(error);
        }
        serde_json::from_slice(bytes.as_ref()).map_err(|error| {
            IdentityProviderError::unavailable(format!("invalid account payload: {error}"))
        })
    }

    async fn set_display_name(&self, id_token: &str, display_name: &DisplayName) -> bool {
        let body = ProfileUpdateRequestDto {
            id_token,
            display_name: display_name.as_ref(),
            return_secure_token: false,
        };
        match self.call("update", &body).await {
            Ok(_) => true,
            Err(error) => {
                warn!(%error, "account created but display name was not stored");
                false
            }
        }
    }
}

fn decode_identity(
    account: AccountResponseDto,
    fallback_email: Option<&Email>,
) -> Result<Identity, IdentityProviderError> {
    account
        .into_identity(fallback_email)
        .map_err(|message| IdentityProviderError::unavailable(format!("account payload: {message}")))
}

#[async_trait]
impl IdentityProvider for IdentityHttpProvider {
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Identity, IdentityProviderError> {
        let body = PasswordRequestDto {
            email: credentials.email().as_ref(),
            password: credentials.password(),
            return_secure_token: true,
        };
        let account = self.call("signInWithPassword", &body).await?;
        decode_identity(account, Some(credentials.email()))
    }

    async fn sign_up(&self, details: &SignUpDetails) -> Result<Identity, IdentityProviderError> {
        let credentials = details.credentials();
        let body = PasswordRequestDto {
            email: credentials.email().as_ref(),
            password: credentials.password(),
            return_secure_token: true,
        };
        let mut account = self.call("signUp", &body).await?;
        let id_token = account.id_token.take();
        let identity = decode_identity(account, Some(credentials.email()))?;

        let Ok(display_name) = DisplayName::new(details.full_name()) else {
            return Ok(identity);
        };
        let stored = match id_token.as_deref() {
            Some(token) => self.set_display_name(token, &display_name).await,
            None => false,
        };
        Ok(if stored {
            identity.with_display_name(Some(display_name))
        } else {
            identity
        })
    }

    async fn sign_in_with_provider(
        &self,
        token: &ProviderToken,
    ) -> Result<Identity, IdentityProviderError> {
        let body = IdpRequestDto {
            post_body: format!(
                "id_token={}&providerId={}",
                urlencoding::encode(token.id_token()),
                token.provider().provider_id()
            ),
            request_uri: self.idp_request_uri.clone(),
            return_secure_token: true,
            return_idp_credential: true,
        };
        let account = self.call("signInWithIdp", &body).await?;
        decode_identity(account, None)
    }
}

fn account_endpoint(base_url: &Url, operation: &str) -> Result<Url, IdentityProviderError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| IdentityProviderError::unavailable("identity base URL cannot hold a path"))?
        .pop_if_empty()
        .push(&format!("accounts:{operation}"));
    Ok(url)
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    IdentityProviderError::unavailable(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        return IdentityProviderError::unavailable(status_message(status, body));
    }
    let Ok(envelope) = serde_json::from_slice::<ErrorEnvelopeDto>(body) else {
        return IdentityProviderError::rejected(status_message(status, body));
    };
    let reason = envelope.error.reason();
    if CREDENTIAL_REASONS.contains(&reason) {
        IdentityProviderError::invalid_credentials()
    } else if reason == EMAIL_EXISTS {
        IdentityProviderError::email_in_use()
    } else {
        IdentityProviderError::rejected(status_message(status, body))
    }
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    let body_preview = body_preview(body);
    if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
