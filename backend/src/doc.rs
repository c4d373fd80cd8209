//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` endpoint plus the health probes,
//! the request and response bodies they use, and the session cookie
//! security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` writes it out for client generation.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{PaymentIntent, PaymentOptions, RelayOutcome};
use crate::domain::{
    Confirmation, Error, ErrorCode, Identity, Notice, NoticeLevel, PaymentMethod, PaymentRecord,
    ProfilePatch, ProfileView, Redirect, RegistrationSubmission, View,
};
use crate::inbound::http::auth::{AuthResponse, ProviderSignInRequest, SignInRequest, SignUpRequest};
use crate::inbound::http::dashboard::DashboardView;
use crate::inbound::http::payments::{PaymentIntentRequest, PaymentStatusResponse};
use crate::inbound::http::profile::ProfileSaved;
use crate::inbound::http::registration::RegistrationAccess;
use crate::inbound::http::RedirectBody;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                crate::inbound::http::session_config::DEFAULT_COOKIE_NAME,
                "Private session cookie issued by the /api/v1/auth endpoints.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Matrimony registration API",
        description = "Sign-in, profile editing, UPI payment intents and the paid registration form."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::sign_in_with_provider,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::dashboard::get_dashboard,
        crate::inbound::http::profile::get_profile,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::payments::initiate_payment,
        crate::inbound::http::payments::payment_status,
        crate::inbound::http::registration::registration_access,
        crate::inbound::http::registration::submit_registration,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Identity,
        View,
        Notice,
        NoticeLevel,
        Redirect,
        RedirectBody,
        SignInRequest,
        SignUpRequest,
        ProviderSignInRequest,
        AuthResponse,
        DashboardView,
        ProfilePatch,
        ProfileView,
        ProfileSaved,
        PaymentMethod,
        PaymentRecord,
        PaymentOptions,
        PaymentIntent,
        PaymentIntentRequest,
        PaymentStatusResponse,
        RegistrationSubmission,
        RegistrationAccess,
        Confirmation,
        RelayOutcome,
    )),
    tags(
        (name = "auth", description = "Password and Google sign-in"),
        (name = "dashboard", description = "Signed-in home view"),
        (name = "profile", description = "Profile editor"),
        (name = "payments", description = "UPI payment intents"),
        (name = "registration", description = "Paid registration form"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
