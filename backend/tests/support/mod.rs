//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates, so the in-memory wiring and
//! the movable clock live here rather than in the library's test support.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, PoisonError};

use actix_session::SessionMiddleware;
use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use matrimony::Trace;
use matrimony::domain::{
    AuthService, IdentityEvents, PaymentIntentService, PaymentSettings, ProfileService,
    RegistrationGateService, RegistrationRelayService, RegistrationSubmission, SessionGate,
};
use matrimony::inbound::http::state::{HttpState, HttpStatePorts};
use matrimony::outbound::memory::{
    InMemoryIdentityProvider, InMemoryPaymentRepository, InMemoryProfileRepository,
    InMemorySubmissionSink,
};

pub const COOKIE_NAME: &str = "matrimony_session";

/// Clock frozen at a chosen instant that tests can move forward.
pub struct SteppingClock(Mutex<DateTime<Utc>>);

impl SteppingClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) += delta;
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Every adapter in memory, with handles kept for assertions.
pub struct MemoryStack {
    pub clock: Arc<SteppingClock>,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub payments: Arc<InMemoryPaymentRepository>,
    pub sink: Arc<InMemorySubmissionSink>,
    pub sessions: Arc<SessionGate>,
    state: web::Data<HttpState>,
}

impl MemoryStack {
    pub fn new() -> Self {
        let clock = Arc::new(SteppingClock::new(fixture_timestamp()));
        let dyn_clock: Arc<dyn Clock> = clock.clone();
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let payments = Arc::new(InMemoryPaymentRepository::new());
        let sink = Arc::new(InMemorySubmissionSink::new());
        let sessions = Arc::new(SessionGate::new(
            IdentityEvents::default(),
            Arc::clone(&dyn_clock),
        ));

        let gate = Arc::new(RegistrationGateService::new(
            Arc::clone(&payments),
            Arc::clone(&sessions),
        ));
        let relay =
            RegistrationRelayService::new(Arc::clone(&gate), Arc::clone(&sink), Arc::clone(&dyn_clock));
        let state = web::Data::new(HttpState::new(
            HttpStatePorts {
                auth: Arc::new(AuthService::new(Arc::new(InMemoryIdentityProvider::new()))),
                profiles: Arc::new(ProfileService::new(
                    Arc::clone(&profiles),
                    Arc::clone(&dyn_clock),
                )),
                payments: Arc::new(PaymentIntentService::new(
                    Arc::clone(&payments),
                    dyn_clock,
                    PaymentSettings::default(),
                )),
                registration_gate: gate,
                registration: Arc::new(relay),
            },
            Arc::clone(&sessions),
        ));

        Self {
            clock,
            profiles,
            payments,
            sink,
            sessions,
            state,
        }
    }

    pub fn state(&self) -> web::Data<HttpState> {
        self.state.clone()
    }
}

/// Private cookie sessions over plain HTTP.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .cookie_content_security(CookieContentSecurity::Private)
        .build()
}

/// The `/api/v1` surface as the server mounts it.
pub fn app(
    state: web::Data<HttpState>,
    key: Key,
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
            .wrap(session_middleware(key))
            .configure(matrimony::inbound::http::configure),
    )
}

/// Session cookie set by `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// A submission with every required field filled in.
pub fn complete_submission() -> RegistrationSubmission {
    let mut submission = RegistrationSubmission::default();
    for name in matrimony::domain::REQUIRED_FIELDS {
        let value = match name {
            "gender" => "female",
            "email" => "asha@example.com",
            "contact" => "98450 00000",
            _ => "filled",
        };
        set_field(&mut submission, name, value);
    }
    submission.name = "Asha Hiremath".to_owned();
    submission
}

fn set_field(submission: &mut RegistrationSubmission, name: &str, value: &str) {
    let mut json = serde_json::to_value(&*submission).expect("serialise submission");
    json[name] = serde_json::Value::String(value.to_owned());
    *submission = serde_json::from_value(json).expect("deserialise submission");
}
