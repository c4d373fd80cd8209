//! Payment attempts and UPI deep links.
//!
//! The web flow only ever records that an attempt was *initiated*. Whether
//! money actually moved is settled out of band by an operator.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use utoipa::ToSchema;

use super::UserId;

/// Default registration fee in rupees.
pub const DEFAULT_AMOUNT: u32 = 5;
/// Currency code carried in every UPI link.
pub const UPI_CURRENCY: &str = "INR";

/// Raised when a payment method name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

/// UPI apps offered on the dashboard.
///
/// JSON uses the lowercase form (`"gpay"`); [`PaymentMethod::as_str`] is the
/// stored and displayed name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    GPay,
    PhonePe,
    Bank,
}

impl PaymentMethod {
    pub const ALL: [Self; 3] = [Self::GPay, Self::PhonePe, Self::Bank];

    /// Stored and displayed name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GPay => "GPay",
            Self::PhonePe => "PhonePe",
            Self::Bank => "Bank",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| UnknownPaymentMethod(s.to_owned()))
    }
}

/// Status of a payment record.
///
/// Unrecognised values written by other tools are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Initiated,
    Completed,
    Other(String),
}

impl PaymentStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Initiated => "initiated",
            Self::Completed => "completed",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Only `completed` unlocks the registration form.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl From<&str> for PaymentStatus {
    fn from(value: &str) -> Self {
        match value {
            "initiated" => Self::Initiated,
            "completed" => Self::Completed,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "initiated" => Self::Initiated,
            "completed" => Self::Completed,
            _ => Self::Other(value),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// One payment attempt per identity. Each new attempt overwrites the last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[schema(value_type = String)]
    pub user_id: UserId,
    #[schema(example = 5)]
    pub amount: u32,
    #[schema(value_type = String, example = "initiated")]
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    pub timestamp: DateTime<Utc>,
}

impl PaymentRecord {
    /// Fresh `initiated` record.
    #[must_use]
    pub fn initiated(
        user_id: UserId,
        amount: u32,
        method: PaymentMethod,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            amount,
            status: PaymentStatus::Initiated,
            method,
            timestamp,
        }
    }
}

/// Receiving UPI account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpiPayee {
    pub upi_id: String,
    pub name: String,
    pub memo: String,
}

impl Default for UpiPayee {
    fn default() -> Self {
        Self {
            upi_id: "9353789909suco@ybl".to_owned(),
            name: "Kalyana Belaku".to_owned(),
            memo: "Marriage Registration Fee".to_owned(),
        }
    }
}

impl UpiPayee {
    /// Deep link handed to the chosen UPI app.
    ///
    /// The payee address and amount are passed through as-is; the name and
    /// memo are percent-encoded.
    ///
    /// # Examples
    /// ```
    /// use matrimony::domain::UpiPayee;
    ///
    /// let link = UpiPayee::default().deep_link(5);
    /// assert_eq!(
    ///     link,
    ///     "upi://pay?pa=9353789909suco@ybl&pn=Kalyana%20Belaku&am=5&cu=INR&tn=Marriage%20Registration%20Fee"
    /// );
    /// ```
    #[must_use]
    pub fn deep_link(&self, amount: u32) -> String {
        format!(
            "{}&tn={}",
            self.fallback_link(amount),
            urlencoding::encode(&self.memo)
        )
    }

    /// Link without a memo, accepted by any UPI app.
    #[must_use]
    pub fn fallback_link(&self, amount: u32) -> String {
        format!(
            "upi://pay?pa={}&pn={}&am={amount}&cu={UPI_CURRENCY}",
            self.upi_id,
            urlencoding::encode(&self.name),
        )
    }
}
