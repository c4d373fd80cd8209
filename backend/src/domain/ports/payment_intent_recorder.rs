//! Driving port for recording payment intents.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Identity, Notice, PaymentMethod, PaymentRecord, View};

/// Result of a recorded payment intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    /// Record as written.
    pub record: PaymentRecord,
    /// Deep link for the chosen UPI app.
    #[schema(example = "upi://pay?pa=9353789909suco@ybl&pn=Kalyana%20Belaku&am=5&cu=INR&tn=Marriage%20Registration%20Fee")]
    pub handoff_uri: String,
    /// Memo-less link accepted by any UPI app.
    pub fallback_uri: String,
    /// Payee address for manual entry.
    #[schema(example = "9353789909suco@ybl")]
    pub upi_id: String,
    /// Screenshot instructions; stays visible until dismissed.
    pub notice: Notice,
    /// View to show once the handoff happens.
    pub next: View,
}

/// Payment choices offered on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOptions {
    pub methods: Vec<PaymentMethod>,
    #[schema(example = 5)]
    pub amount: u32,
    #[schema(example = "INR")]
    pub currency: String,
    #[schema(example = "9353789909suco@ybl")]
    pub upi_id: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentIntentRecorder: Send + Sync {
    /// Record an `initiated` attempt and build the handoff link.
    ///
    /// Without an identity nothing is written.
    async fn initiate<'a>(
        &self,
        identity: Option<&'a Identity>,
        method: PaymentMethod,
    ) -> Result<PaymentIntent, Error>;

    /// Most recent attempt by `identity`, if any.
    async fn latest(&self, identity: &Identity) -> Result<Option<PaymentRecord>, Error>;

    /// Methods and amount offered to users.
    fn options(&self) -> PaymentOptions;
}
