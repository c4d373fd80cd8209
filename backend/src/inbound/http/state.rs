//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving ports plus the shared [`SessionGate`], so they stay testable
//! without I/O.

use std::sync::Arc;

use crate::domain::SessionGate;
use crate::domain::ports::{
    Authenticator, PaymentIntentRecorder, ProfileEditor, RegistrationGate, RegistrationRelay,
};

/// Parameter object bundling the driving-port implementations.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub auth: Arc<dyn Authenticator>,
    pub profiles: Arc<dyn ProfileEditor>,
    pub payments: Arc<dyn PaymentIntentRecorder>,
    pub registration_gate: Arc<dyn RegistrationGate>,
    pub registration: Arc<dyn RegistrationRelay>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn Authenticator>,
    pub profiles: Arc<dyn ProfileEditor>,
    pub payments: Arc<dyn PaymentIntentRecorder>,
    pub registration_gate: Arc<dyn RegistrationGate>,
    pub registration: Arc<dyn RegistrationRelay>,
    /// Admission control shared with the services that observe sign-outs.
    pub sessions: Arc<SessionGate>,
}

impl HttpState {
    pub fn new(ports: HttpStatePorts, sessions: Arc<SessionGate>) -> Self {
        let HttpStatePorts {
            auth,
            profiles,
            payments,
            registration_gate,
            registration,
        } = ports;
        Self {
            auth,
            profiles,
            payments,
            registration_gate,
            registration,
            sessions,
        }
    }
}
