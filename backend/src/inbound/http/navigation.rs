//! Redirect responses and session admission for protected endpoints.
//!
//! A redirect is `303 See Other` with a `Location` header naming the client
//! route, plus a JSON body so API clients can show the notice.

use actix_web::HttpResponse;
use actix_web::http::header::LOCATION;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, GateDecision, Identity, Notice, Redirect, SessionIdentity, View};

use super::session::SessionContext;
use super::state::HttpState;

/// Body of every redirect response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedirectBody {
    /// Client route, e.g. `/dashboard`.
    #[schema(example = "/")]
    pub redirect: String,
    pub view: View,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl From<Redirect> for RedirectBody {
    fn from(value: Redirect) -> Self {
        Self {
            redirect: value.to.path().to_owned(),
            view: value.to,
            notice: value.notice,
        }
    }
}

/// `303 See Other` towards the redirect's view.
pub fn see_other(redirect: Redirect) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, redirect.to.path()))
        .json(RedirectBody::from(redirect))
}

/// Resolve the signed-in identity for `view`, or the redirect response.
///
/// A cookie whose session the gate no longer admits is purged.
pub(crate) fn admit(
    state: &HttpState,
    session: &SessionContext,
    view: View,
) -> Result<Identity, HttpResponse> {
    let stored = session.identity();
    match state.sessions.admit(view, stored.as_ref()) {
        GateDecision::Admit(identity) => Ok(identity),
        GateDecision::Redirect(redirect) => {
            if stored.is_some() {
                session.purge();
            }
            Err(see_other(redirect))
        }
    }
}

/// Stored session if the gate still considers it signed in.
///
/// A stale cookie is purged.
pub(crate) fn active_session(state: &HttpState, session: &SessionContext) -> Option<SessionIdentity> {
    let stored = session.identity()?;
    if state.sessions.is_active(&stored) {
        Some(stored)
    } else {
        session.purge();
        None
    }
}

/// Signed-in identity for a mutation, or `401` carrying `message`.
pub(crate) fn require_identity(
    state: &HttpState,
    session: &SessionContext,
    message: &str,
) -> Result<Identity, Error> {
    active_session(state, session)
        .map(|active| active.identity)
        .ok_or_else(|| Error::unauthorized(message))
}
