//! Driving port for the profile editor.

use async_trait::async_trait;

use crate::domain::{Error, Identity, ProfilePatch, ProfileView};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileEditor: Send + Sync {
    /// Stored profile merged over defaults.
    async fn load(&self, identity: &Identity) -> Result<ProfileView, Error>;

    /// Merge `patch` into the stored profile and return the result.
    async fn save(&self, identity: &Identity, patch: ProfilePatch) -> Result<ProfileView, Error>;
}
