//! Domain primitives, services and ports.
//!
//! Purpose: model the registration workflow independently of HTTP and
//! storage. Inbound adapters call the driving ports in [`ports`]; outbound
//! adapters implement the driven ones.
//!
//! Public surface:
//! - Identity primitives: [`UserId`], [`Email`], [`DisplayName`], [`Identity`].
//! - Workflow state: [`SessionGate`], [`RegistrationGateMachine`],
//!   [`IdentityEvents`].
//! - Records: [`ProfileRecord`], [`PaymentRecord`], [`RegistrationSubmission`].
//! - Services implementing the driving ports.

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod identity_events;
pub mod navigation;
pub mod payment;
pub mod payment_service;
pub mod ports;
pub mod profile;
pub mod profile_service;
pub mod registration;
pub mod registration_gate;
pub mod registration_service;
pub mod session_gate;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AuthValidationError, FILL_ALL_FIELDS, LoginCredentials, ProviderToken, SignUpDetails,
    SocialProvider,
};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::identity_events::{IdentityChange, IdentityEvents, IdentitySubscription};
pub use self::navigation::{Notice, NoticeLevel, Redirect, View};
pub use self::payment::{
    DEFAULT_AMOUNT, PaymentMethod, PaymentRecord, PaymentStatus, UPI_CURRENCY, UpiPayee,
};
pub use self::payment_service::{PaymentIntentService, PaymentReconciliationService, PaymentSettings};
pub use self::profile::{ProfilePatch, ProfileRecord, ProfileView, ProfileWrite};
pub use self::profile_service::ProfileService;
pub use self::registration::{
    Confirmation, DEFAULT_CONFIRMATION_PHONE, REQUIRED_FIELDS, RegistrationSubmission,
    SubmissionEnvelope,
};
pub use self::registration_gate::{
    GateInput, GateState, RegistrationGateMachine, RegistrationGateService,
};
pub use self::registration_service::RegistrationRelayService;
pub use self::session_gate::{GateDecision, SessionGate, SessionIdentity};
pub use self::trace_id::TraceId;
pub use self::user::{DisplayName, Email, Identity, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use matrimony::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
