//! Profile editor handlers.
//!
//! ```text
//! GET /api/v1/profile
//! PUT /api/v1/profile {"fullName":"Asha Rao","age":27,"city":"Mysuru"}
//! ```

use actix_web::{HttpResponse, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::profile_service::PROFILE_SAVED;
use crate::domain::{Error, Notice, ProfilePatch, ProfileView, View};

use super::ApiResult;
use super::navigation::{RedirectBody, admit, require_identity};
use super::session::SessionContext;
use super::state::HttpState;

const LOGIN_TO_SAVE: &str = "Please login to save profile";

/// Saved profile plus the confirmation notice.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSaved {
    pub profile: ProfileView,
    pub notice: Notice,
}

#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Stored profile over defaults", body = ProfileView),
        (status = 303, description = "Not signed in", body = RedirectBody),
        (status = 503, description = "Profile store unavailable", body = Error)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let identity = match admit(&state, &session, View::Profile) {
        Ok(identity) => identity,
        Err(redirect) => return Ok(redirect),
    };
    let profile = state.profiles.load(&identity).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Merge the supplied fields into the stored profile.
///
/// Omitted fields keep their stored values.
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    request_body = ProfilePatch,
    responses(
        (status = 200, description = "Profile saved", body = ProfileSaved),
        (status = 400, description = "Field out of range", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 403, description = "Store refused the write", body = Error),
        (status = 503, description = "Profile store unavailable", body = Error)
    ),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[put("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfilePatch>,
) -> ApiResult<web::Json<ProfileSaved>> {
    let identity = require_identity(&state, &session, LOGIN_TO_SAVE)?;
    let profile = state.profiles.save(&identity, payload.into_inner()).await?;
    Ok(web::Json(ProfileSaved {
        profile,
        notice: Notice::success(PROFILE_SAVED),
    }))
}
