//! Driven port for relaying registration submissions.

use async_trait::async_trait;

use crate::domain::SubmissionEnvelope;

use super::define_port_error;

define_port_error! {
    /// Failures raised while handing a submission to its destination.
    pub enum SubmissionSinkError {
        /// The request never reached the endpoint.
        Transport { message: String } => "submission transport failed: {message}",
    }
}

/// Destination for registration submissions.
///
/// Delivery is at-most-once. `Ok` means the request was sent; whatever the
/// endpoint answered is not inspected.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn deliver(&self, envelope: &SubmissionEnvelope) -> Result<(), SubmissionSinkError>;
}
