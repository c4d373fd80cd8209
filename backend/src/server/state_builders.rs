//! Adapter selection and service assembly for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use matrimony::domain::ports::{
    Authenticator, PaymentRepository, ProfileRepository, SubmissionSink,
};
use matrimony::domain::{
    AuthService, IdentityEvents, PaymentIntentService, ProfileService, RegistrationGateService,
    RegistrationRelayService, SessionGate,
};
use matrimony::inbound::http::state::{HttpState, HttpStatePorts};
use matrimony::outbound::identity::IdentityHttpProvider;
use matrimony::outbound::memory::{
    InMemoryIdentityProvider, InMemoryPaymentRepository, InMemoryProfileRepository,
    InMemorySubmissionSink,
};
use matrimony::outbound::persistence::{DieselPaymentRepository, DieselProfileRepository};
use matrimony::outbound::spreadsheet::SpreadsheetWebhookSink;

use super::ServerConfig;

/// Shared pieces every service needs.
struct Shared<'a> {
    config: &'a ServerConfig,
    clock: Arc<dyn Clock>,
    sessions: Arc<SessionGate>,
    auth: Arc<dyn Authenticator>,
}

fn assemble<P, R, S>(
    shared: Shared<'_>,
    profiles: Arc<P>,
    payments: Arc<R>,
    sink: Arc<S>,
) -> web::Data<HttpState>
where
    P: ProfileRepository + 'static,
    R: PaymentRepository + 'static,
    S: SubmissionSink + 'static,
{
    let Shared {
        config,
        clock,
        sessions,
        auth,
    } = shared;
    let gate = Arc::new(RegistrationGateService::new(
        Arc::clone(&payments),
        Arc::clone(&sessions),
    ));
    let relay = RegistrationRelayService::new(Arc::clone(&gate), sink, Arc::clone(&clock))
        .with_confirmation_phone(config.confirmation_phone.clone());

    web::Data::new(HttpState::new(
        HttpStatePorts {
            auth,
            profiles: Arc::new(ProfileService::new(profiles, Arc::clone(&clock))),
            payments: Arc::new(PaymentIntentService::new(
                payments,
                clock,
                config.payment.clone(),
            )),
            registration_gate: gate,
            registration: Arc::new(relay),
        },
        sessions,
    ))
}

fn with_sink<P, R>(shared: Shared<'_>, profiles: Arc<P>, payments: Arc<R>) -> std::io::Result<web::Data<HttpState>>
where
    P: ProfileRepository + 'static,
    R: PaymentRepository + 'static,
{
    match &shared.config.webhook {
        Some(target) => {
            let sink = SpreadsheetWebhookSink::new(target.endpoint.clone(), target.timeout)
                .map_err(|err| std::io::Error::other(format!("webhook client: {err}")))?;
            info!(endpoint = %target.endpoint, "registrations relay to spreadsheet webhook");
            Ok(assemble(shared, profiles, payments, Arc::new(sink)))
        }
        None => {
            info!("no webhook configured; registrations kept in memory");
            Ok(assemble(
                shared,
                profiles,
                payments,
                Arc::new(InMemorySubmissionSink::new()),
            ))
        }
    }
}

fn build_authenticator(config: &ServerConfig) -> std::io::Result<Arc<dyn Authenticator>> {
    match &config.identity {
        Some(settings) => {
            let provider = IdentityHttpProvider::new(settings.clone())
                .map_err(|err| std::io::Error::other(format!("identity client: {err}")))?;
            Ok(Arc::new(AuthService::new(Arc::new(provider))))
        }
        None => {
            info!("no identity service configured; using in-process accounts");
            Ok(Arc::new(AuthService::new(Arc::new(
                InMemoryIdentityProvider::new(),
            ))))
        }
    }
}

/// Build handler state, choosing database or in-memory storage from the pool.
///
/// # Errors
///
/// Returns [`std::io::Error`] when an HTTP client cannot be constructed.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let sessions = Arc::new(
        SessionGate::new(IdentityEvents::default(), Arc::clone(&clock))
            .with_ttl(config.session.ttl),
    );
    let shared = Shared {
        config,
        clock,
        sessions,
        auth: build_authenticator(config)?,
    };

    match &config.db_pool {
        Some(pool) => with_sink(
            shared,
            Arc::new(DieselProfileRepository::new(pool.clone())),
            Arc::new(DieselPaymentRepository::new(pool.clone())),
        ),
        None => {
            info!("no database configured; profiles and payments kept in memory");
            with_sink(
                shared,
                Arc::new(InMemoryProfileRepository::new()),
                Arc::new(InMemoryPaymentRepository::new()),
            )
        }
    }
}
