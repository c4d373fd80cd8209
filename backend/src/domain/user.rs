//! Identity primitives issued by the external identity provider.
//!
//! The service never mints identities itself; it validates what the provider
//! returns and carries it around in typed form.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Maximum accepted length of a provider-issued user id.
pub const USER_ID_MAX: usize = 128;
/// Maximum accepted length of an email address.
pub const EMAIL_MAX: usize = 254;
/// Maximum accepted length of a display name.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Validation errors for identity primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// User id was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// User id contained characters outside `[A-Za-z0-9_-]` or was too long.
    #[error("user id must be at most {USER_ID_MAX} characters of [A-Za-z0-9_-]")]
    InvalidId,
    /// Email was blank.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email did not have a `local@domain` shape.
    #[error("email must look like name@domain")]
    InvalidEmail,
    /// Display name was blank.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// Display name exceeded [`DISPLAY_NAME_MAX`] characters.
    #[error("display name must be at most {DISPLAY_NAME_MAX} characters")]
    DisplayNameTooLong,
}

/// Opaque user identifier assigned by the identity provider.
///
/// Provider ids are not UUIDs, so only the character set and length are
/// checked.
///
/// # Examples
/// ```
/// use matrimony::domain::UserId;
///
/// let id = UserId::new("Zx81kQ2mPaV0bXc3").expect("valid uid");
/// assert_eq!(id.as_ref(), "Zx81kQ2mPaV0bXc3");
/// assert!(UserId::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        let valid = id.len() <= USER_ID_MAX
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address as reported by the provider, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.len() > EMAIL_MAX || trimmed.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(UserValidationError::InvalidEmail),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable name. Any script is accepted; only blankness and length
/// are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authenticated subject returned by the identity provider.
///
/// This service only ever reads identities; the provider owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Provider-issued unique id.
    #[schema(value_type = String, example = "Zx81kQ2mPaV0bXc3")]
    pub id: UserId,
    /// Email the subject signed in with.
    #[schema(value_type = String, example = "asha@example.com")]
    pub email: Email,
    /// Optional display name.
    #[schema(value_type = Option<String>, example = "Asha Hiremath")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<DisplayName>,
}

impl Identity {
    /// Build an identity without a display name.
    #[must_use]
    pub fn new(id: UserId, email: Email) -> Self {
        Self {
            id,
            email,
            display_name: None,
        }
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: Option<DisplayName>) -> Self {
        self.display_name = display_name;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case("abc def", UserValidationError::InvalidId)]
    #[case("abc/def", UserValidationError::InvalidId)]
    fn rejects_malformed_user_ids(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw).expect_err("must fail"), expected);
    }

    #[test]
    fn rejects_overlong_user_id() {
        let raw = "a".repeat(USER_ID_MAX + 1);
        assert_eq!(
            UserId::new(raw).expect_err("must fail"),
            UserValidationError::InvalidId
        );
    }

    #[rstest]
    #[case("  asha@example.com ", "asha@example.com")]
    #[case("a@b", "a@b")]
    fn accepts_and_trims_emails(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(Email::new(raw).expect("valid email").as_ref(), expected);
    }

    #[rstest]
    #[case("   ", UserValidationError::EmptyEmail)]
    #[case("no-at-sign", UserValidationError::InvalidEmail)]
    #[case("@example.com", UserValidationError::InvalidEmail)]
    #[case("asha@", UserValidationError::InvalidEmail)]
    #[case("a@b@c", UserValidationError::InvalidEmail)]
    #[case("as ha@example.com", UserValidationError::InvalidEmail)]
    fn rejects_malformed_emails(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Email::new(raw).expect_err("must fail"), expected);
    }

    #[test]
    fn display_name_accepts_kannada_script() {
        let name = DisplayName::new(" ಆಶಾ ಹಿರೇಮಠ ").expect("valid name");
        assert_eq!(name.as_ref(), "ಆಶಾ ಹಿರೇಮಠ");
    }

    #[test]
    fn identity_serialises_camel_case() {
        let identity = Identity::new(
            UserId::new("uid-1").expect("uid"),
            Email::new("asha@example.com").expect("email"),
        )
        .with_display_name(Some(DisplayName::new("Asha").expect("name")));
        let value = serde_json::to_value(&identity).expect("serialise");
        assert_eq!(value["displayName"], "Asha");
        assert_eq!(value["id"], "uid-1");
    }

    #[test]
    fn identity_deserialisation_validates_fields() {
        let result: Result<Identity, _> =
            serde_json::from_str(r#"{"id":"bad id","email":"asha@example.com"}"#);
        assert!(result.is_err());
    }
}
