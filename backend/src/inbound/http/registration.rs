//! Registration form handlers.
//!
//! ```text
//! GET /api/v1/registration
//! POST /api/v1/registration {"name":"Asha Hiremath","gender":"female",...}
//! ```
//!
//! Both endpoints consult the registration gate; the form is only served
//! and relayed for a signed-in identity whose latest payment is completed.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RelayOutcome;
use crate::domain::{Error, GateDecision, Identity, RegistrationSubmission};

use super::ApiResult;
use super::navigation::{RedirectBody, active_session, see_other};
use super::session::SessionContext;
use super::state::HttpState;

/// Returned when the form may be shown.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationAccess {
    pub identity: Identity,
}

#[utoipa::path(
    get,
    path = "/api/v1/registration",
    responses(
        (status = 200, description = "Form may be shown", body = RegistrationAccess),
        (status = 303, description = "Not signed in or payment incomplete", body = RedirectBody),
        (status = 503, description = "Payment status unavailable", body = Error)
    ),
    tags = ["registration"],
    operation_id = "checkRegistrationAccess"
)]
#[get("/registration")]
pub async fn registration_access(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let active = active_session(&state, &session);
    match state.registration_gate.check(active.as_ref()).await? {
        GateDecision::Admit(identity) => {
            Ok(HttpResponse::Ok().json(RegistrationAccess { identity }))
        }
        GateDecision::Redirect(redirect) => Ok(see_other(redirect)),
    }
}

/// Relay a completed form to the spreadsheet.
///
/// A `200` means the submission was handed off, not that the spreadsheet
/// stored it.
#[utoipa::path(
    post,
    path = "/api/v1/registration",
    request_body = RegistrationSubmission,
    responses(
        (status = 200, description = "Submission handed off", body = RelayOutcome),
        (status = 303, description = "Gate turned the submission away", body = RedirectBody),
        (status = 400, description = "Required fields missing", body = Error),
        (status = 503, description = "Relay failed; resubmit", body = Error)
    ),
    tags = ["registration"],
    operation_id = "submitRegistration"
)]
#[post("/registration")]
pub async fn submit_registration(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegistrationSubmission>,
) -> ApiResult<HttpResponse> {
    let active = active_session(&state, &session);
    let outcome = state
        .registration
        .submit(active.as_ref(), payload.into_inner())
        .await?;
    match outcome {
        RelayOutcome::Redirected { redirect } => Ok(see_other(redirect)),
        submitted @ RelayOutcome::Submitted { .. } => Ok(HttpResponse::Ok().json(submitted)),
    }
}
