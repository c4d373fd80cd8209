//! Views, notices and redirects.
//!
//! Every workflow outcome is either content for the requested view or a
//! redirect to another view carrying a user-visible notice.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Client views the workflow navigates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum View {
    /// Public landing page with the sign-in forms.
    Landing,
    /// Signed-in home with payment options.
    Dashboard,
    /// Profile editor.
    Profile,
    /// Detailed registration form.
    Registration,
}

impl View {
    /// Client route path for this view.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Dashboard => "/dashboard",
            Self::Profile => "/profile",
            Self::Registration => "/registration-form",
        }
    }

    /// Whether the view requires a signed-in identity.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        !matches!(self, Self::Landing)
    }
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// Transient message shown to the user.
///
/// `persistent` notices stay on screen until dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub level: NoticeLevel,
    #[schema(example = "Please login first")]
    pub message: String,
    #[serde(default)]
    pub persistent: bool,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            persistent: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            persistent: false,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            persistent: false,
        }
    }

    /// Keep the notice visible until dismissed.
    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }
}

/// One-way navigation to another view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    /// Destination view.
    pub to: View,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl Redirect {
    #[must_use]
    pub fn to(view: View) -> Self {
        Self {
            to: view,
            notice: None,
        }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}
