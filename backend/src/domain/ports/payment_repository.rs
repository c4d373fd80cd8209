//! Driven port for payment records.

use async_trait::async_trait;

use crate::domain::{PaymentRecord, PaymentStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by payment repository adapters.
    pub enum PaymentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "payment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "payment repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Fetch the record for `user_id`.
    async fn find(&self, user_id: &UserId) -> Result<Option<PaymentRecord>, PaymentRepositoryError>;

    /// Store `record`, replacing any previous attempt by the same user.
    async fn put(&self, record: &PaymentRecord) -> Result<(), PaymentRepositoryError>;

    /// Change the status of an existing record.
    ///
    /// Returns the updated record, or `None` when the user has no record.
    async fn update_status(
        &self,
        user_id: &UserId,
        status: &PaymentStatus,
    ) -> Result<Option<PaymentRecord>, PaymentRepositoryError>;
}
