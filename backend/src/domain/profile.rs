//! Profile records owned by each identity.
//!
//! A record is created on first save and merged field-wise on every later
//! save. There is no delete path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::{Email, Identity, UserId};

/// Youngest accepted age.
pub const AGE_MIN: u8 = 1;
/// Oldest accepted age.
pub const AGE_MAX: u8 = 150;
/// Maximum length of free-text profile fields.
pub const PROFILE_TEXT_MAX: usize = 120;

/// Validation errors raised by [`ProfilePatch::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileValidationError {
    #[error("age must be between {AGE_MIN} and {AGE_MAX}")]
    AgeOutOfRange,
    #[error("{field} must be at most {PROFILE_TEXT_MAX} characters")]
    TooLong { field: &'static str },
}

/// Stored profile document.
///
/// Only fields that have ever been saved are `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub user_id: UserId,
    pub full_name: Option<String>,
    pub age: Option<u8>,
    pub city: Option<String>,
    pub email: Option<Email>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default)]
    #[schema(example = "Asha Hiremath")]
    pub full_name: Option<String>,
    #[serde(default)]
    #[schema(example = 27)]
    pub age: Option<u8>,
    #[serde(default)]
    #[schema(example = "Dharwad")]
    pub city: Option<String>,
}

impl ProfilePatch {
    /// Check field ranges. Text fields are trimmed in place.
    pub fn validate(mut self) -> Result<Self, ProfileValidationError> {
        if let Some(age) = self.age {
            if !(AGE_MIN..=AGE_MAX).contains(&age) {
                return Err(ProfileValidationError::AgeOutOfRange);
            }
        }
        self.full_name = normalise_text(self.full_name, "fullName")?;
        self.city = normalise_text(self.city, "city")?;
        Ok(self)
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.age.is_none() && self.city.is_none()
    }
}

fn normalise_text(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<String>, ProfileValidationError> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.chars().count() > PROFILE_TEXT_MAX {
                return Err(ProfileValidationError::TooLong { field });
            }
            Ok(Some(trimmed.to_owned()))
        }
    }
}

/// Profile as shown in the editor: stored fields merged over defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub full_name: String,
    pub age: Option<u8>,
    pub city: String,
    #[schema(value_type = String)]
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileView {
    /// Defaults for an identity with no stored profile.
    #[must_use]
    pub fn defaults(identity: &Identity, now: DateTime<Utc>) -> Self {
        Self {
            full_name: String::new(),
            age: None,
            city: String::new(),
            email: identity.email.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge `record` over the defaults.
    ///
    /// The email always comes from the signed-in identity.
    #[must_use]
    pub fn merged(identity: &Identity, record: Option<&ProfileRecord>, now: DateTime<Utc>) -> Self {
        let mut view = Self::defaults(identity, now);
        if let Some(record) = record {
            if let Some(full_name) = &record.full_name {
                view.full_name.clone_from(full_name);
            }
            if record.age.is_some() {
                view.age = record.age;
            }
            if let Some(city) = &record.city {
                view.city.clone_from(city);
            }
            view.created_at = record.created_at;
            view.updated_at = record.updated_at;
        }
        view
    }
}

/// Write handed to the profile repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileWrite {
    pub user_id: UserId,
    pub email: Email,
    pub patch: ProfilePatch,
    /// Timestamp for `createdAt` when the record does not exist yet and
    /// `updatedAt` always.
    pub at: DateTime<Utc>,
}

impl ProfileWrite {
    /// Apply this write to an optional stored record.
    #[must_use]
    pub fn apply(&self, existing: Option<ProfileRecord>) -> ProfileRecord {
        let mut record = existing.unwrap_or_else(|| ProfileRecord {
            user_id: self.user_id.clone(),
            full_name: None,
            age: None,
            city: None,
            email: None,
            created_at: self.at,
            updated_at: self.at,
        });
        if let Some(full_name) = &self.patch.full_name {
            record.full_name = Some(full_name.clone());
        }
        if let Some(age) = self.patch.age {
            record.age = Some(age);
        }
        if let Some(city) = &self.patch.city {
            record.city = Some(city.clone());
        }
        record.email = Some(self.email.clone());
        record.updated_at = self.at;
        record
    }
}
