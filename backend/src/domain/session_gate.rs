//! Session gate guarding protected views.
//!
//! The gate keeps a subscription to identity-change notifications and a
//! registry of revoked sessions. Each admission check drains pending
//! notifications first, so a sign-out published by any request is honoured
//! by every later check.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    Identity, IdentityChange, IdentityEvents, IdentitySubscription, Notice, Redirect, View,
};

/// Default lifetime of a signed-in session.
pub const DEFAULT_SESSION_TTL: Duration = Duration::hours(2);

/// Identity bound to one cookie session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    pub session_id: Uuid,
    pub identity: Identity,
    pub signed_in_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionIdentity {
    /// Start a new session for `identity` at `now`.
    #[must_use]
    pub fn start(identity: Identity, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            identity,
            signed_in_at: now,
            expires_at: now + ttl,
        }
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the view for this identity.
    Admit(Identity),
    /// Leave the view.
    Redirect(Redirect),
}

/// Notice shown when `view` is requested without a signed-in identity.
#[must_use]
pub fn login_required_notice(view: View) -> Notice {
    let message = match view {
        View::Profile => "Please login to access your profile",
        View::Dashboard => "Please login to access the dashboard",
        View::Landing | View::Registration => "Please login first",
    };
    Notice::error(message)
}

/// Admission control for protected views.
pub struct SessionGate {
    events: IdentityEvents,
    subscription: Mutex<IdentitySubscription>,
    revoked: DashMap<Uuid, DateTime<Utc>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionGate {
    /// Create a gate listening on `events`.
    pub fn new(events: IdentityEvents, clock: Arc<dyn Clock>) -> Self {
        let subscription = Mutex::new(events.subscribe());
        Self {
            events,
            subscription,
            revoked: DashMap::new(),
            clock,
            ttl: DEFAULT_SESSION_TTL,
        }
    }

    /// Override the session lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Session lifetime applied to new sessions.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Shared notification hub.
    pub fn events(&self) -> &IdentityEvents {
        &self.events
    }

    /// Start and announce a session for `identity`.
    pub fn open_session(&self, identity: Identity) -> SessionIdentity {
        let session = SessionIdentity::start(identity, self.clock.utc(), self.ttl);
        self.events.publish(IdentityChange::SignedIn {
            user_id: session.identity.id.clone(),
            session_id: session.session_id,
            at: session.signed_in_at,
        });
        session
    }

    /// Revoke `session` and announce the sign-out.
    ///
    /// The revocation is recorded before publishing, so it holds even if
    /// this gate's own subscription later lags past the notification.
    pub fn close_session(&self, session: &SessionIdentity) {
        let change = IdentityChange::SignedOut {
            user_id: session.identity.id.clone(),
            session_id: session.session_id,
            at: self.clock.utc(),
        };
        self.revoked
            .insert(session.session_id, revocation_horizon(&change, self.ttl));
        self.events.publish(change);
        self.sync();
    }

    /// Decide whether `session` may see the protected `view`.
    pub fn admit(&self, view: View, session: Option<&SessionIdentity>) -> GateDecision {
        match session {
            Some(session) if self.is_active(session) => GateDecision::Admit(session.identity.clone()),
            _ => {
                debug!(view = view.path(), "denying view to absent identity");
                GateDecision::Redirect(
                    Redirect::to(View::Landing).with_notice(login_required_notice(view)),
                )
            }
        }
    }

    /// Whether `session` is still signed in.
    ///
    /// A session past its expiry is reported once as [`IdentityChange::Expired`].
    pub fn is_active(&self, session: &SessionIdentity) -> bool {
        self.sync();
        if self.revoked.contains_key(&session.session_id) {
            return false;
        }
        let now = self.clock.utc();
        if session.is_expired_at(now) {
            info!(session_id = %session.session_id, "session expired");
            self.revoked.insert(session.session_id, now + self.ttl);
            self.events.publish(IdentityChange::Expired {
                user_id: session.identity.id.clone(),
                session_id: session.session_id,
                at: now,
            });
            return false;
        }
        true
    }

    /// Apply pending notifications and forget revocations whose sessions
    /// would have expired anyway.
    ///
    /// Sign-outs and expiries raised by this gate are recorded directly. Only
    /// revocations published by other parties depend on the subscription, and
    /// those are lost if more than the hub capacity arrive between checks.
    fn sync(&self) {
        let changes = match self.subscription.lock() {
            Ok(mut subscription) => subscription.drain(),
            Err(poisoned) => poisoned.into_inner().drain(),
        };
        for change in changes {
            if change.is_revocation() {
                debug!(session_id = %change.session_id(), "session revoked");
                self.revoked
                    .insert(change.session_id(), revocation_horizon(&change, self.ttl));
            }
        }
        let now = self.clock.utc();
        self.revoked.retain(|_, horizon| *horizon > now);
    }
}

fn revocation_horizon(change: &IdentityChange, ttl: Duration) -> DateTime<Utc> {
    match change {
        IdentityChange::SignedIn { at, .. }
        | IdentityChange::SignedOut { at, .. }
        | IdentityChange::Expired { at, .. } => *at + ttl,
    }
}
