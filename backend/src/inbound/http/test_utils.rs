//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::test::TestRequest;
use actix_web::{App, web};
use serde_json::json;

use crate::Trace;
use crate::domain::ports::{
    MockAuthenticator, MockPaymentIntentRecorder, MockProfileEditor, MockRegistrationGate,
    MockRegistrationRelay,
};
use crate::domain::{IdentityEvents, SessionGate};
use crate::test_support::{MutableClock, fixture_identity, fixture_timestamp};

use super::state::{HttpState, HttpStatePorts};

pub(crate) const TEST_COOKIE_NAME: &str = "session";

/// Session middleware with a fresh key and an insecure cookie for plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == TEST_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Password sign-in as the fixture identity; pair with [`MockPorts::signed_in`].
pub fn sign_in_request() -> TestRequest {
    TestRequest::post()
        .uri("/api/v1/auth/sign-in")
        .set_json(json!({"email": "asha@example.com", "password": "secret"}))
}

/// Session gate over a controllable clock.
pub fn test_gate(clock: Arc<MutableClock>) -> Arc<SessionGate> {
    Arc::new(SessionGate::new(IdentityEvents::default(), clock))
}

/// Mocked driving ports for handler tests. Unset expectations panic if hit.
pub struct MockPorts {
    pub auth: MockAuthenticator,
    pub profiles: MockProfileEditor,
    pub payments: MockPaymentIntentRecorder,
    pub registration_gate: MockRegistrationGate,
    pub registration: MockRegistrationRelay,
    pub clock: Arc<MutableClock>,
}

impl MockPorts {
    pub fn new() -> Self {
        Self {
            auth: MockAuthenticator::new(),
            profiles: MockProfileEditor::new(),
            payments: MockPaymentIntentRecorder::new(),
            registration_gate: MockRegistrationGate::new(),
            registration: MockRegistrationRelay::new(),
            clock: Arc::new(MutableClock::new(fixture_timestamp())),
        }
    }

    /// Let one password sign-in succeed as the fixture identity.
    #[must_use]
    pub fn signed_in(mut self) -> Self {
        self.auth
            .expect_sign_in()
            .times(1)
            .return_once(|_| Ok(fixture_identity()));
        self
    }

    /// Freeze the mocks into handler state sharing one session gate.
    pub fn into_state(self) -> web::Data<HttpState> {
        let sessions = test_gate(self.clock);
        web::Data::new(HttpState::new(
            HttpStatePorts {
                auth: Arc::new(self.auth),
                profiles: Arc::new(self.profiles),
                payments: Arc::new(self.payments),
                registration_gate: Arc::new(self.registration_gate),
                registration: Arc::new(self.registration),
            },
            sessions,
        ))
    }
}

/// Full `/api/v1` surface over `state` with a test session cookie.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).wrap(Trace).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(super::configure),
    )
}
