//! Payment-intent recorder and operator reconciliation.
//!
//! The recorder writes an `initiated` record before handing off a UPI link;
//! it never marks a payment as completed. Only
//! [`PaymentReconciliationService`] changes the status afterwards.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    PaymentIntent, PaymentIntentRecorder, PaymentOptions, PaymentRepository,
    PaymentRepositoryError,
};
use crate::domain::{
    DEFAULT_AMOUNT, Error, Identity, Notice, PaymentMethod, PaymentRecord, PaymentStatus,
    UPI_CURRENCY, UpiPayee, UserId, View,
};

pub const LOGIN_FIRST: &str = "Please login first";
pub const PAYMENT_INITIATION_FAILED: &str = "Failed to initiate payment. Please try again.";
/// Phone number screenshots are sent to.
pub const DEFAULT_SCREENSHOT_PHONE: &str = "78291 46919";

/// Fixed parameters of the payment flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSettings {
    pub payee: UpiPayee,
    pub amount: u32,
    pub screenshot_phone: String,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            payee: UpiPayee::default(),
            amount: DEFAULT_AMOUNT,
            screenshot_phone: DEFAULT_SCREENSHOT_PHONE.to_owned(),
        }
    }
}

impl PaymentSettings {
    fn screenshot_notice(&self) -> Notice {
        Notice::success(format!(
            "After payment, please send the screenshot to {} to proceed",
            self.screenshot_phone
        ))
        .persistent()
    }
}

/// Service implementing [`PaymentIntentRecorder`].
#[derive(Clone)]
pub struct PaymentIntentService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
    settings: PaymentSettings,
}

impl<R> PaymentIntentService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>, settings: PaymentSettings) -> Self {
        Self {
            repo,
            clock,
            settings,
        }
    }
}

#[async_trait]
impl<R> PaymentIntentRecorder for PaymentIntentService<R>
where
    R: PaymentRepository,
{
    async fn initiate<'a>(
        &self,
        identity: Option<&'a Identity>,
        method: PaymentMethod,
    ) -> Result<PaymentIntent, Error> {
        let Some(identity) = identity else {
            return Err(Error::unauthorized(LOGIN_FIRST));
        };
        let record = PaymentRecord::initiated(
            identity.id.clone(),
            self.settings.amount,
            method,
            self.clock.utc(),
        );
        self.repo.put(&record).await.map_err(|err| {
            error!(error = %err, user_id = %identity.id, "recording payment intent failed");
            Error::service_unavailable(PAYMENT_INITIATION_FAILED)
        })?;
        info!(user_id = %identity.id, %method, "payment intent recorded");

        let payee = &self.settings.payee;
        Ok(PaymentIntent {
            handoff_uri: payee.deep_link(record.amount),
            fallback_uri: payee.fallback_link(record.amount),
            upi_id: payee.upi_id.clone(),
            notice: self.settings.screenshot_notice(),
            next: View::Registration,
            record,
        })
    }

    async fn latest(&self, identity: &Identity) -> Result<Option<PaymentRecord>, Error> {
        self.repo.find(&identity.id).await.map_err(|err| {
            error!(error = %err, user_id = %identity.id, "reading payment record failed");
            Error::service_unavailable("Failed to load payment status")
        })
    }

    fn options(&self) -> PaymentOptions {
        PaymentOptions {
            methods: PaymentMethod::ALL.to_vec(),
            amount: self.settings.amount,
            currency: UPI_CURRENCY.to_owned(),
            upi_id: self.settings.payee.upi_id.clone(),
        }
    }
}

/// Operator-side status changes after a payment screenshot is checked.
pub struct PaymentReconciliationService<R> {
    repo: Arc<R>,
}

impl<R> PaymentReconciliationService<R>
where
    R: PaymentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Set the status of `user_id`'s record.
    ///
    /// Fails with `not_found` when the user never initiated a payment.
    pub async fn set_status(
        &self,
        user_id: &UserId,
        status: PaymentStatus,
    ) -> Result<PaymentRecord, Error> {
        let updated = self
            .repo
            .update_status(user_id, &status)
            .await
            .map_err(|err| match err {
                PaymentRepositoryError::Connection { message } => {
                    Error::service_unavailable(format!("payment store unavailable: {message}"))
                }
                PaymentRepositoryError::Query { message } => {
                    Error::internal(format!("payment status update failed: {message}"))
                }
            })?;
        let record = updated.ok_or_else(|| {
            Error::not_found(format!("no payment record for user {user_id}"))
        })?;
        info!(%user_id, status = %record.status, "payment status reconciled");
        Ok(record)
    }
}
