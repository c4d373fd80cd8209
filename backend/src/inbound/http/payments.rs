//! UPI payment handlers.
//!
//! ```text
//! POST /api/v1/payments/intent {"method":"phonepe"}
//! GET /api/v1/payments/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::payment_service::LOGIN_FIRST;
use crate::domain::ports::{PaymentIntent, PaymentOptions};
use crate::domain::{Error, PaymentMethod, PaymentRecord, View};

use super::ApiResult;
use super::navigation::{RedirectBody, active_session, admit};
use super::session::SessionContext;
use super::state::HttpState;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub method: PaymentMethod,
}

/// Latest attempt plus the choices offered for a new one.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    pub payment: Option<PaymentRecord>,
    pub options: PaymentOptions,
}

/// Record an `initiated` attempt and return the UPI handoff link.
///
/// The record is written before the client leaves for the UPI app. A
/// recorded attempt does not unlock registration; only a reconciled
/// `completed` status does.
#[utoipa::path(
    post,
    path = "/api/v1/payments/intent",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Attempt recorded", body = PaymentIntent),
        (status = 400, description = "Unknown method", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 503, description = "Payment store unavailable", body = Error)
    ),
    tags = ["payments"],
    operation_id = "initiatePayment"
)]
#[post("/payments/intent")]
pub async fn initiate_payment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<PaymentIntentRequest>, actix_web::Error>,
) -> ApiResult<web::Json<PaymentIntent>> {
    // Session before body: anonymous callers get 401 whatever they send.
    let identity = active_session(&state, &session).map(|active| active.identity);
    if identity.is_none() {
        return Err(Error::unauthorized(LOGIN_FIRST));
    }
    let payload = payload.map_err(|err| Error::invalid_request(err.to_string()))?;
    let intent = state
        .payments
        .initiate(identity.as_ref(), payload.method)
        .await?;
    Ok(web::Json(intent))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/me",
    responses(
        (status = 200, description = "Latest payment attempt", body = PaymentStatusResponse),
        (status = 303, description = "Not signed in", body = RedirectBody),
        (status = 503, description = "Payment store unavailable", body = Error)
    ),
    tags = ["payments"],
    operation_id = "getPaymentStatus"
)]
#[get("/payments/me")]
pub async fn payment_status(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let identity = match admit(&state, &session, View::Dashboard) {
        Ok(identity) => identity,
        Err(redirect) => return Ok(redirect),
    };
    let payment = state.payments.latest(&identity).await?;
    Ok(HttpResponse::Ok().json(PaymentStatusResponse {
        payment,
        options: state.payments.options(),
    }))
}
