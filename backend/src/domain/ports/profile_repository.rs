//! Driven port for profile documents.

use async_trait::async_trait;

use crate::domain::{ProfileRecord, ProfileWrite, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// The store refused access to the document.
        PermissionDenied => "profile store denied access",
        /// The store did not accept the caller's credentials.
        Unauthenticated => "profile store rejected credentials",
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "profile repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the stored profile for `user_id`.
    async fn find(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, ProfileRepositoryError>;

    /// Create the profile or merge the provided fields into it.
    ///
    /// Fields absent from the write must keep their stored values.
    async fn merge(&self, write: &ProfileWrite) -> Result<ProfileRecord, ProfileRepositoryError>;
}
