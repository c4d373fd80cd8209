//! Form submission relay.
//!
//! A submission is validated, re-checked against the registration gate and
//! handed to the sink exactly once. Nothing is kept afterwards; on failure
//! the client still holds its form and can resubmit.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{RegistrationGate, RegistrationRelay, RelayOutcome, SubmissionSink};
use crate::domain::{
    Confirmation, DEFAULT_CONFIRMATION_PHONE, Error, GateDecision, RegistrationSubmission,
    SessionIdentity, SubmissionEnvelope, View,
};

pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
pub const REQUIRED_FIELDS_MISSING: &str = "Please fill in all required fields.";

/// Service implementing [`RegistrationRelay`].
pub struct RegistrationRelayService<G, S> {
    gate: Arc<G>,
    sink: Arc<S>,
    clock: Arc<dyn Clock>,
    confirmation_phone: String,
}

impl<G, S> RegistrationRelayService<G, S> {
    pub fn new(gate: Arc<G>, sink: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            gate,
            sink,
            clock,
            confirmation_phone: DEFAULT_CONFIRMATION_PHONE.to_owned(),
        }
    }

    /// Override the phone number shown on the confirmation.
    #[must_use]
    pub fn with_confirmation_phone(mut self, phone: impl Into<String>) -> Self {
        self.confirmation_phone = phone.into();
        self
    }
}

#[async_trait]
impl<G, S> RegistrationRelay for RegistrationRelayService<G, S>
where
    G: RegistrationGate,
    S: SubmissionSink,
{
    async fn submit<'a>(
        &self,
        session: Option<&'a SessionIdentity>,
        submission: RegistrationSubmission,
    ) -> Result<RelayOutcome, Error> {
        if let GateDecision::Redirect(redirect) = self.gate.check(session).await? {
            return Ok(RelayOutcome::Redirected { redirect });
        }
        if let Err(problems) = submission.validate() {
            return Err(Error::invalid_request(REQUIRED_FIELDS_MISSING).with_details(json!({
                "missing": problems.missing,
                "invalid": problems.invalid,
            })));
        }

        let envelope = SubmissionEnvelope::wrap(submission, self.clock.utc());
        self.sink.deliver(&envelope).await.map_err(|err| {
            warn!(error = %err, "registration relay failed");
            Error::service_unavailable(REGISTRATION_FAILED)
        })?;
        info!(timestamp = %envelope.data.timestamp, "registration relayed");

        Ok(RelayOutcome::Submitted {
            confirmation: Confirmation::new(self.confirmation_phone.clone()),
            next: View::Landing,
        })
    }
}
