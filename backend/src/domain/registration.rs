//! Detailed registration form and its webhook envelope.
//!
//! Submissions are relayed once and never stored; the service keeps no
//! identifier and offers no read path.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Phone number shown on the confirmation.
pub const DEFAULT_CONFIRMATION_PHONE: &str = "+91 7829146919";

/// Wire names of the fields a submission must fill in.
pub const REQUIRED_FIELDS: [&str; 15] = [
    "name",
    "gender",
    "father",
    "fatherOccupation",
    "birthName",
    "caste",
    "education",
    "occupation",
    "maritalStatus",
    "annualIncome",
    "mother",
    "motherOccupation",
    "contact",
    "email",
    "address",
];

/// Accepted `gender` values.
pub const GENDERS: [&str; 2] = ["male", "female"];

/// Flat registration record. Every field is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationSubmission {
    #[schema(example = "Asha Hiremath")]
    pub name: String,
    #[schema(example = "female")]
    pub gender: String,
    pub father: String,
    pub father_occupation: String,
    pub birth_name: String,
    #[schema(example = "1998-04-12")]
    pub birth_date: String,
    #[schema(example = "06:45")]
    pub birth_time: String,
    pub place: String,
    pub raashi: String,
    pub nakshatra: String,
    pub caste: String,
    pub subcaste: String,
    pub peeta: String,
    pub homegod: String,
    pub height: String,
    pub education: String,
    pub occupation: String,
    pub marital_status: String,
    pub annual_income: String,
    pub other_details: String,
    pub partner_preference: String,
    pub mother: String,
    pub mother_occupation: String,
    pub sisters: String,
    pub brothers: String,
    pub contact: String,
    pub email: String,
    pub address: String,
}

/// Problems found by [`RegistrationSubmission::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionProblems {
    /// Required fields that are blank.
    pub missing: Vec<&'static str>,
    /// Fields present but with an unaccepted value.
    pub invalid: Vec<&'static str>,
}

impl SubmissionProblems {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

impl RegistrationSubmission {
    /// Value of the field with wire name `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "name" => &self.name,
            "gender" => &self.gender,
            "father" => &self.father,
            "fatherOccupation" => &self.father_occupation,
            "birthName" => &self.birth_name,
            "birthDate" => &self.birth_date,
            "birthTime" => &self.birth_time,
            "place" => &self.place,
            "raashi" => &self.raashi,
            "nakshatra" => &self.nakshatra,
            "caste" => &self.caste,
            "subcaste" => &self.subcaste,
            "peeta" => &self.peeta,
            "homegod" => &self.homegod,
            "height" => &self.height,
            "education" => &self.education,
            "occupation" => &self.occupation,
            "maritalStatus" => &self.marital_status,
            "annualIncome" => &self.annual_income,
            "otherDetails" => &self.other_details,
            "partnerPreference" => &self.partner_preference,
            "mother" => &self.mother,
            "motherOccupation" => &self.mother_occupation,
            "sisters" => &self.sisters,
            "brothers" => &self.brothers,
            "contact" => &self.contact,
            "email" => &self.email,
            "address" => &self.address,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Report blank required fields and unaccepted values.
    ///
    /// Whitespace-only values count as blank.
    pub fn validate(&self) -> Result<(), SubmissionProblems> {
        let missing = REQUIRED_FIELDS
            .into_iter()
            .filter(|name| self.field(name).is_none_or(|value| value.trim().is_empty()))
            .collect();
        let mut problems = SubmissionProblems {
            missing,
            invalid: Vec::new(),
        };
        let gender = self.gender.trim();
        if !gender.is_empty() && !GENDERS.contains(&gender) {
            problems.invalid.push("gender");
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

/// Body POSTed to the spreadsheet webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionEnvelope {
    pub data: SubmissionData,
}

/// Submission fields plus the columns the spreadsheet expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionData {
    #[serde(flatten)]
    pub submission: RegistrationSubmission,
    pub image1: String,
    pub image2: String,
    pub timestamp: String,
}

impl SubmissionEnvelope {
    /// Wrap `submission`, stamping it with `at` in ISO-8601 UTC.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use matrimony::domain::{RegistrationSubmission, SubmissionEnvelope};
    ///
    /// let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
    /// let envelope = SubmissionEnvelope::wrap(RegistrationSubmission::default(), at);
    /// assert_eq!(envelope.data.timestamp, "2026-03-01T09:30:00.000Z");
    /// ```
    #[must_use]
    pub fn wrap(submission: RegistrationSubmission, at: DateTime<Utc>) -> Self {
        Self {
            data: SubmissionData {
                submission,
                image1: String::new(),
                image2: String::new(),
                timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        }
    }
}

/// Shown after a relay is handed off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    #[schema(example = "Registration Successful!")]
    pub title: String,
    #[schema(example = "For more details, please contact:")]
    pub message: String,
    #[schema(example = "+91 7829146919")]
    pub phone: String,
}

impl Confirmation {
    #[must_use]
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            title: "Registration Successful!".to_owned(),
            message: "For more details, please contact:".to_owned(),
            phone: phone.into(),
        }
    }
}
