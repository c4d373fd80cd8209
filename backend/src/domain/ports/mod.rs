//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`IdentityProvider`, `ProfileRepository`,
//! `PaymentRepository`, `SubmissionSink`) are implemented by outbound
//! adapters. Driving ports (`Authenticator`, `ProfileEditor`,
//! `PaymentIntentRecorder`, `RegistrationGate`, `RegistrationRelay`) are
//! implemented by domain services and called from inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod identity_provider;
mod payment_intent_recorder;
mod payment_repository;
mod profile_editor;
mod profile_repository;
mod registration_gate;
mod registration_relay;
mod submission_sink;

pub use authenticator::Authenticator;
#[cfg(test)]
pub use authenticator::MockAuthenticator;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use payment_intent_recorder::MockPaymentIntentRecorder;
pub use payment_intent_recorder::{PaymentIntent, PaymentIntentRecorder, PaymentOptions};
#[cfg(test)]
pub use payment_repository::MockPaymentRepository;
pub use payment_repository::{PaymentRepository, PaymentRepositoryError};
#[cfg(test)]
pub use profile_editor::MockProfileEditor;
pub use profile_editor::ProfileEditor;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use registration_gate::MockRegistrationGate;
pub use registration_gate::RegistrationGate;
#[cfg(test)]
pub use registration_relay::MockRegistrationRelay;
pub use registration_relay::{RegistrationRelay, RelayOutcome};
#[cfg(test)]
pub use submission_sink::MockSubmissionSink;
pub use submission_sink::{SubmissionSink, SubmissionSinkError};
