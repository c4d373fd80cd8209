//! Dashboard handler.
//!
//! ```text
//! GET /api/v1/dashboard
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::PaymentOptions;
use crate::domain::{Identity, Notice, PaymentRecord, ProfileView, View};

use super::ApiResult;
use super::navigation::{RedirectBody, admit};
use super::session::SessionContext;
use super::state::HttpState;

/// Everything the signed-in home view shows.
///
/// A profile that cannot be loaded leaves `profile` empty and sets `notice`;
/// the rest of the dashboard still renders.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub identity: Identity,
    pub profile: Option<ProfileView>,
    pub payment: Option<PaymentRecord>,
    pub options: PaymentOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard content", body = DashboardView),
        (status = 303, description = "Not signed in", body = RedirectBody)
    ),
    tags = ["dashboard"],
    operation_id = "getDashboard"
)]
#[get("/dashboard")]
pub async fn get_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let identity = match admit(&state, &session, View::Dashboard) {
        Ok(identity) => identity,
        Err(redirect) => return Ok(redirect),
    };

    let (profile, notice) = match state.profiles.load(&identity).await {
        Ok(profile) => (Some(profile), None),
        Err(error) => (None, Some(Notice::error(error.message()))),
    };
    let payment = state.payments.latest(&identity).await.unwrap_or_else(|error| {
        warn!(%error, user_id = %identity.id, "dashboard rendered without payment status");
        None
    });

    Ok(HttpResponse::Ok().json(DashboardView {
        options: state.payments.options(),
        identity,
        profile,
        payment,
        notice,
    }))
}
