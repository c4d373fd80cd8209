//! Authentication primitives: password credentials, sign-up details and
//! social provider tokens.
//!
//! Inbound adapters build these from raw payloads before talking to the
//! identity provider port, so blank inputs never leave the process.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{Email, UserValidationError};

/// Message shown when any sign-in or sign-up field is blank.
pub const FILL_ALL_FIELDS: &str = "Please fill in all fields.";

/// Domain error returned when authentication payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email was present but malformed.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
    /// Sign-up full name was blank.
    EmptyFullName,
    /// Sign-up mobile number was blank.
    EmptyMobile,
    /// Social provider token was blank.
    EmptyProviderToken,
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like name@domain"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyFullName => write!(f, "full name must not be empty"),
            Self::EmptyMobile => write!(f, "mobile number must not be empty"),
            Self::EmptyProviderToken => write!(f, "provider token must not be empty"),
        }
    }
}

impl std::error::Error for AuthValidationError {}

impl AuthValidationError {
    /// Name of the offending payload field, for error details.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPassword => "password",
            Self::EmptyFullName => "fullName",
            Self::EmptyMobile => "mobile",
            Self::EmptyProviderToken => "idToken",
        }
    }
}

/// Validated email/password credentials.
///
/// ## Invariants
/// - `email` is trimmed and shaped like `name@domain`.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use matrimony::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("asha@example.com", "secret").unwrap();
/// assert_eq!(creds.email().as_ref(), "asha@example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = Email::new(email).map_err(|err| match err {
            UserValidationError::EmptyEmail => AuthValidationError::EmptyEmail,
            _ => AuthValidationError::InvalidEmail,
        })?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email the subject signs in with.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Registration details for a new password account.
///
/// The mobile number is collected but only the full name is forwarded to the
/// identity provider as a display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpDetails {
    full_name: String,
    mobile: String,
    credentials: LoginCredentials,
}

impl SignUpDetails {
    /// Validate all sign-up fields.
    pub fn try_from_parts(
        full_name: &str,
        mobile: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(AuthValidationError::EmptyFullName);
        }
        let mobile = mobile.trim();
        if mobile.is_empty() {
            return Err(AuthValidationError::EmptyMobile);
        }
        let credentials = LoginCredentials::try_from_parts(email, password)?;
        Ok(Self {
            full_name: full_name.to_owned(),
            mobile: mobile.to_owned(),
            credentials,
        })
    }

    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    pub fn mobile(&self) -> &str {
        self.mobile.as_str()
    }

    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }
}

/// Social sign-in providers accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
}

impl SocialProvider {
    /// Provider id understood by the identity service's IdP exchange.
    #[must_use]
    pub const fn provider_id(self) -> &'static str {
        match self {
            Self::Google => "google.com",
        }
    }
}

/// Provider-issued id token exchanged for an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderToken {
    provider: SocialProvider,
    id_token: Zeroizing<String>,
}

impl ProviderToken {
    /// Validate a raw provider token.
    pub fn try_new(provider: SocialProvider, id_token: &str) -> Result<Self, AuthValidationError> {
        let id_token = id_token.trim();
        if id_token.is_empty() {
            return Err(AuthValidationError::EmptyProviderToken);
        }
        Ok(Self {
            provider,
            id_token: Zeroizing::new(id_token.to_owned()),
        })
    }

    pub fn provider(&self) -> SocialProvider {
        self.provider
    }

    pub fn id_token(&self) -> &str {
        self.id_token.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", AuthValidationError::EmptyEmail)]
    #[case("   ", "pw", AuthValidationError::EmptyEmail)]
    #[case("not-an-email", "pw", AuthValidationError::InvalidEmail)]
    #[case("asha@example.com", "", AuthValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: AuthValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn password_whitespace_is_preserved() {
        let creds = LoginCredentials::try_from_parts(" asha@example.com ", " pw ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.email().as_ref(), "asha@example.com");
        assert_eq!(creds.password(), " pw ");
    }

    #[rstest]
    #[case("", "98450 00000", AuthValidationError::EmptyFullName)]
    #[case("Asha", "  ", AuthValidationError::EmptyMobile)]
    fn sign_up_requires_name_and_mobile(
        #[case] full_name: &str,
        #[case] mobile: &str,
        #[case] expected: AuthValidationError,
    ) {
        let err = SignUpDetails::try_from_parts(full_name, mobile, "asha@example.com", "pw")
            .expect_err("missing fields must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn sign_up_trims_name_and_mobile() {
        let details =
            SignUpDetails::try_from_parts(" Asha ", " 98450 00000 ", "asha@example.com", "pw")
                .expect("valid sign-up");
        assert_eq!(details.full_name(), "Asha");
        assert_eq!(details.mobile(), "98450 00000");
    }

    #[test]
    fn provider_token_rejects_blank() {
        assert_eq!(
            ProviderToken::try_new(SocialProvider::Google, " ").expect_err("blank token"),
            AuthValidationError::EmptyProviderToken
        );
    }

    #[test]
    fn google_maps_to_idp_provider_id() {
        assert_eq!(SocialProvider::Google.provider_id(), "google.com");
    }
}
