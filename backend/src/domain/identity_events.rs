//! Identity-change notifications.
//!
//! Sign-in, sign-out and session expiry are broadcast over a bounded hub.
//! Consumers hold an [`IdentitySubscription`]; dropping it unsubscribes, so
//! every exit path of a check releases its listener.

use chrono::{DateTime, Utc};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};
use uuid::Uuid;

use super::UserId;

/// Default number of buffered notifications per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 512;

/// A change in who is signed in on a given session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityChange {
    /// A session was established.
    SignedIn {
        user_id: UserId,
        session_id: Uuid,
        at: DateTime<Utc>,
    },
    /// The user signed out of a session.
    SignedOut {
        user_id: UserId,
        session_id: Uuid,
        at: DateTime<Utc>,
    },
    /// The session outlived its lifetime and is treated as signed out.
    Expired {
        user_id: UserId,
        session_id: Uuid,
        at: DateTime<Utc>,
    },
}

impl IdentityChange {
    pub fn user_id(&self) -> &UserId {
        match self {
            Self::SignedIn { user_id, .. }
            | Self::SignedOut { user_id, .. }
            | Self::Expired { user_id, .. } => user_id,
        }
    }

    pub fn session_id(&self) -> Uuid {
        match self {
            Self::SignedIn { session_id, .. }
            | Self::SignedOut { session_id, .. }
            | Self::Expired { session_id, .. } => *session_id,
        }
    }

    /// Whether this change ends a session.
    #[must_use]
    pub fn is_revocation(&self) -> bool {
        !matches!(self, Self::SignedIn { .. })
    }
}

/// Broadcast hub for [`IdentityChange`] notifications.
///
/// Cloning shares the same hub.
#[derive(Debug, Clone)]
pub struct IdentityEvents {
    sender: broadcast::Sender<IdentityChange>,
}

impl IdentityEvents {
    /// Create a hub buffering up to `capacity` notifications per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Deliver `change` to every live subscriber.
    pub fn publish(&self, change: IdentityChange) {
        if let Err(err) = self.sender.send(change) {
            debug!(change = ?err.0, "identity change published with no subscribers");
        }
    }

    /// Register a new listener. Only changes published afterwards are seen.
    #[must_use]
    pub fn subscribe(&self) -> IdentitySubscription {
        IdentitySubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for IdentityEvents {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

/// Listener registration. Dropping it unsubscribes.
#[derive(Debug)]
pub struct IdentitySubscription {
    receiver: broadcast::Receiver<IdentityChange>,
}

impl IdentitySubscription {
    /// Take every notification that is ready without waiting.
    ///
    /// A subscriber that falls more than the hub capacity behind loses the
    /// oldest notifications; the loss is logged and the rest are returned.
    pub fn drain(&mut self) -> Vec<IdentityChange> {
        let mut changes = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(change) => changes.push(change),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "identity subscription lagged; notifications dropped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        changes
    }

    /// Wait for the next notification. `None` once the hub is gone.
    pub async fn next(&mut self) -> Option<IdentityChange> {
        loop {
            match self.receiver.recv().await {
                Ok(change) => return Some(change),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "identity subscription lagged; notifications dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
