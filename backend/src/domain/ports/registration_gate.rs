//! Driving port for the registration gate.

use async_trait::async_trait;

use crate::domain::{Error, GateDecision, SessionIdentity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationGate: Send + Sync {
    /// Decide whether `session` may open the registration form.
    ///
    /// A payment lookup failure is an error; the gate is then neither
    /// allowed nor redirected.
    async fn check<'a>(&self, session: Option<&'a SessionIdentity>) -> Result<GateDecision, Error>;
}
