//! Authentication handlers.
//!
//! ```text
//! POST /api/v1/auth/sign-in {"email":"asha@example.com","password":"secret"}
//! POST /api/v1/auth/sign-up {"fullName":"Asha","mobile":"98450 00000",...}
//! POST /api/v1/auth/provider {"provider":"google","idToken":"..."}
//! POST /api/v1/auth/sign-out
//! ```
//!
//! Every successful sign-in opens a session on the gate, which announces it
//! to subscribers, and stores the session in the private cookie.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::auth_service::AUTH_FAILED;
use crate::domain::{
    AuthValidationError, Error, FILL_ALL_FIELDS, Identity, LoginCredentials, Notice,
    ProviderToken, Redirect, SignUpDetails, SocialProvider, View,
};

use super::ApiResult;
use super::navigation::{RedirectBody, see_other};
use super::session::SessionContext;
use super::state::HttpState;

const SIGNED_IN: &str = "Successfully logged in!";
const ACCOUNT_CREATED: &str = "Account created successfully!";
const SOCIAL_SIGNED_IN: &str = "Successfully logged in with Google!";

/// Request body for `POST /api/v1/auth/sign-in`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SignInRequest {
    #[schema(example = "asha@example.com")]
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/v1/auth/sign-up`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpRequest {
    #[schema(example = "Asha Rao")]
    pub full_name: String,
    #[schema(example = "98450 00000")]
    pub mobile: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/v1/auth/provider`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSignInRequest {
    pub provider: SocialProvider,
    #[serde(default)]
    pub id_token: String,
}

/// Signed-in identity plus where the client goes next.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub identity: Identity,
    pub next: RedirectBody,
}

fn map_auth_validation_error(error: AuthValidationError) -> Error {
    let code = match error {
        AuthValidationError::EmptyEmail => "empty_email",
        AuthValidationError::InvalidEmail => "invalid_email",
        AuthValidationError::EmptyPassword => "empty_password",
        AuthValidationError::EmptyFullName => "empty_full_name",
        AuthValidationError::EmptyMobile => "empty_mobile",
        AuthValidationError::EmptyProviderToken => "empty_id_token",
    };
    let message = match error {
        AuthValidationError::InvalidEmail => AUTH_FAILED,
        _ => FILL_ALL_FIELDS,
    };
    Error::invalid_request(message).with_details(json!({ "field": error.field(), "code": code }))
}

fn establish(
    state: &HttpState,
    session: &SessionContext,
    identity: Identity,
    notice: &str,
) -> ApiResult<HttpResponse> {
    if let Some(previous) = session.identity() {
        state.sessions.close_session(&previous);
    }
    let opened = state.sessions.open_session(identity);
    session.persist(&opened)?;
    info!(user_id = %opened.identity.id, session_id = %opened.session_id, "session opened");
    Ok(HttpResponse::Ok().json(AuthResponse {
        identity: opened.identity,
        next: Redirect::to(View::Dashboard)
            .with_notice(Notice::success(notice))
            .into(),
    }))
}

/// Sign in with email and password.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank or malformed fields", body = Error),
        (status = 401, description = "Authentication failed", body = Error),
        (status = 503, description = "Identity service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/auth/sign-in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignInRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&request.email, &request.password)
        .map_err(map_auth_validation_error)?;
    let identity = state.auth.sign_in(&credentials).await?;
    establish(&state, &session, identity, SIGNED_IN)
}

/// Create a password account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Account created", body = AuthResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank or malformed fields", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Identity service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/auth/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let details = SignUpDetails::try_from_parts(
        &request.full_name,
        &request.mobile,
        &request.email,
        &request.password,
    )
    .map_err(map_auth_validation_error)?;
    let identity = state.auth.sign_up(&details).await?;
    establish(&state, &session, identity, ACCOUNT_CREATED)
}

/// Exchange a social provider id token for a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/provider",
    request_body = ProviderSignInRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing token", body = Error),
        (status = 401, description = "Token rejected", body = Error),
        (status = 503, description = "Identity service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signInWithProvider",
    security([])
)]
#[post("/auth/provider")]
pub async fn sign_in_with_provider(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProviderSignInRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let token = ProviderToken::try_new(request.provider, &request.id_token)
        .map_err(map_auth_validation_error)?;
    let identity = state.auth.sign_in_with_provider(&token).await?;
    establish(&state, &session, identity, SOCIAL_SIGNED_IN)
}

/// End the current session and return to the landing view.
#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-out",
    responses(
        (status = 303, description = "Signed out", body = RedirectBody)
    ),
    tags = ["auth"],
    operation_id = "signOut"
)]
#[post("/auth/sign-out")]
pub async fn sign_out(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    if let Some(current) = session.identity() {
        state.sessions.close_session(&current);
        info!(user_id = %current.identity.id, session_id = %current.session_id, "session closed");
    }
    session.purge();
    see_other(Redirect::to(View::Landing))
}
