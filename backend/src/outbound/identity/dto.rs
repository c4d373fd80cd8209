//! Wire shapes for the identity service's `accounts:*` endpoints.
//!
//! Requests are built from domain values in the adapter; responses decode into
//! these DTOs and then map into [`Identity`] in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::{DisplayName, Email, Identity, UserId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PasswordRequestDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProfileUpdateRequestDto<'a> {
    pub(super) id_token: &'a str,
    pub(super) display_name: &'a str,
    pub(super) return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct IdpRequestDto {
    pub(super) post_body: String,
    pub(super) request_uri: String,
    pub(super) return_secure_token: bool,
    pub(super) return_idp_credential: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AccountResponseDto {
    pub(super) local_id: String,
    pub(super) email: Option<String>,
    pub(super) display_name: Option<String>,
    pub(super) id_token: Option<String>,
}

impl AccountResponseDto {
    /// `fallback_email` covers responses that omit the address.
    pub(super) fn into_identity(self, fallback_email: Option<&Email>) -> Result<Identity, String> {
        let id = UserId::new(self.local_id).map_err(|err| format!("localId: {err}"))?;
        let email = match (self.email, fallback_email) {
            (Some(raw), _) => Email::new(raw).map_err(|err| format!("email: {err}"))?,
            (None, Some(email)) => email.clone(),
            (None, None) => return Err("account has no email address".to_owned()),
        };
        // Provider display names are informational; drop ones we cannot hold.
        let display_name = self
            .display_name
            .filter(|name| !name.trim().is_empty())
            .and_then(|name| DisplayName::new(name).ok());
        Ok(Identity::new(id, email).with_display_name(display_name))
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: ErrorBodyDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) message: String,
}

impl ErrorBodyDto {
    /// Leading reason token, e.g. `INVALID_PASSWORD` from
    /// `"INVALID_PASSWORD : The password is invalid."`.
    pub(super) fn reason(&self) -> &str {
        self.message
            .split([' ', ':'])
            .find(|token| !token.is_empty())
            .unwrap_or_default()
    }
}
