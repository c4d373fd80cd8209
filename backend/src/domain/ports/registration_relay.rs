//! Driving port for relaying registration submissions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Confirmation, Error, Redirect, RegistrationSubmission, SessionIdentity, View};

/// Outcome of a relay attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum RelayOutcome {
    /// The submission was handed off; delivery is unconfirmed.
    Submitted {
        confirmation: Confirmation,
        next: View,
    },
    /// The registration gate turned the submission away.
    Redirected { redirect: Redirect },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRelay: Send + Sync {
    /// Validate and relay `submission` for `session`.
    async fn submit<'a>(
        &self,
        session: Option<&'a SessionIdentity>,
        submission: RegistrationSubmission,
    ) -> Result<RelayOutcome, Error>;
}
