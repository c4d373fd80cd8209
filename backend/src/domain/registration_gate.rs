//! Registration gate: only identities whose payment record is `completed`
//! may open the registration form.
//!
//! A check starts in [`GateState::Checking`] and settles exactly once into
//! [`GateState::Allowed`] or [`GateState::DeniedRedirected`]. Later inputs
//! are ignored.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{PaymentRepository, RegistrationGate};
use crate::domain::{
    Error, GateDecision, Identity, IdentityEvents, Notice, PaymentRecord, Redirect,
    SessionGate, SessionIdentity, View,
};

pub const PAYMENT_REQUIRED: &str = "Please complete the payment first";
pub const PAYMENT_CHECK_FAILED: &str = "Failed to verify payment status";

/// State of one gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Checking,
    Allowed(Identity),
    DeniedRedirected(Redirect),
}

impl GateState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Checking)
    }
}

/// Facts observed while checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateInput {
    /// No signed-in identity.
    NoIdentity,
    /// The identity signed out or expired while the check ran.
    IdentityRevoked,
    /// The payment record for the identity was read.
    Payment {
        identity: Identity,
        record: Option<PaymentRecord>,
    },
}

/// Pure transition logic of the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationGateMachine {
    state: GateState,
}

impl Default for RegistrationGateMachine {
    fn default() -> Self {
        Self {
            state: GateState::Checking,
        }
    }
}

impl RegistrationGateMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Apply `input`. Terminal states never change.
    pub fn resolve(&mut self, input: GateInput) -> &GateState {
        if self.state.is_terminal() {
            return &self.state;
        }
        self.state = match input {
            GateInput::NoIdentity | GateInput::IdentityRevoked => {
                GateState::DeniedRedirected(Redirect::to(View::Dashboard))
            }
            GateInput::Payment { identity, record } => match record {
                Some(record) if record.status.is_completed() => GateState::Allowed(identity),
                _ => GateState::DeniedRedirected(
                    Redirect::to(View::Dashboard).with_notice(Notice::error(PAYMENT_REQUIRED)),
                ),
            },
        };
        &self.state
    }

    /// Final decision, or `None` while still checking.
    #[must_use]
    pub fn decision(self) -> Option<GateDecision> {
        match self.state {
            GateState::Checking => None,
            GateState::Allowed(identity) => Some(GateDecision::Admit(identity)),
            GateState::DeniedRedirected(redirect) => Some(GateDecision::Redirect(redirect)),
        }
    }
}

/// Service implementing [`RegistrationGate`].
pub struct RegistrationGateService<P> {
    payments: Arc<P>,
    sessions: Arc<SessionGate>,
}

impl<P> Clone for RegistrationGateService<P> {
    fn clone(&self) -> Self {
        Self {
            payments: Arc::clone(&self.payments),
            sessions: Arc::clone(&self.sessions),
        }
    }
}

impl<P> RegistrationGateService<P> {
    pub fn new(payments: Arc<P>, sessions: Arc<SessionGate>) -> Self {
        Self { payments, sessions }
    }

    fn events(&self) -> &IdentityEvents {
        self.sessions.events()
    }
}

#[async_trait]
impl<P> RegistrationGate for RegistrationGateService<P>
where
    P: PaymentRepository,
{
    async fn check<'a>(&self, session: Option<&'a SessionIdentity>) -> Result<GateDecision, Error> {
        // Held until the check returns; dropping it unsubscribes.
        let mut subscription = self.events().subscribe();
        let mut machine = RegistrationGateMachine::new();

        let session = match session {
            Some(session) if self.sessions.is_active(session) => session,
            _ => {
                machine.resolve(GateInput::NoIdentity);
                return machine
                    .decision()
                    .ok_or_else(|| Error::internal("registration gate did not settle"));
            }
        };
        let identity = &session.identity;

        let record = self.payments.find(&identity.id).await.map_err(|err| {
            warn!(error = %err, user_id = %identity.id, "payment lookup failed");
            Error::service_unavailable(PAYMENT_CHECK_FAILED)
        })?;

        let revoked = subscription
            .drain()
            .iter()
            .any(|change| change.is_revocation() && change.user_id() == &identity.id);
        if revoked {
            debug!(user_id = %identity.id, "identity left during registration check");
            machine.resolve(GateInput::IdentityRevoked);
        }
        machine.resolve(GateInput::Payment {
            identity: identity.clone(),
            record,
        });
        machine
            .decision()
            .ok_or_else(|| Error::internal("registration gate did not settle"))
    }
}
