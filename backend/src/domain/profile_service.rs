//! Profile editor service.
//!
//! Reads merge stored fields over defaults; writes merge only the fields
//! the caller provided and stamp `updatedAt`. Store failures are classified
//! into three user-visible messages.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, warn};

use crate::domain::ports::{ProfileEditor, ProfileRepository, ProfileRepositoryError};
use crate::domain::{Error, Identity, ProfilePatch, ProfileView, ProfileWrite};

pub const PROFILE_PERMISSION_DENIED: &str = "Permission denied. Please try logging in again.";
pub const PROFILE_UNAUTHENTICATED: &str = "You must be logged in to save your profile.";
pub const PROFILE_SAVE_FAILED: &str = "Failed to save profile data. Please try again.";
pub const PROFILE_LOAD_FAILED: &str = "Failed to load profile data";
pub const PROFILE_SAVED: &str = "Profile updated successfully!";

fn map_save_error(err: ProfileRepositoryError) -> Error {
    match err {
        ProfileRepositoryError::PermissionDenied => Error::forbidden(PROFILE_PERMISSION_DENIED),
        ProfileRepositoryError::Unauthenticated => Error::unauthorized(PROFILE_UNAUTHENTICATED),
        other => {
            error!(error = %other, "profile save failed");
            Error::service_unavailable(PROFILE_SAVE_FAILED)
        }
    }
}

/// Service implementing [`ProfileEditor`].
#[derive(Clone)]
pub struct ProfileService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ProfileService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> ProfileEditor for ProfileService<R>
where
    R: ProfileRepository,
{
    async fn load(&self, identity: &Identity) -> Result<ProfileView, Error> {
        let record = self.repo.find(&identity.id).await.map_err(|err| {
            warn!(error = %err, user_id = %identity.id, "profile load failed");
            Error::service_unavailable(PROFILE_LOAD_FAILED)
        })?;
        Ok(ProfileView::merged(identity, record.as_ref(), self.clock.utc()))
    }

    async fn save(&self, identity: &Identity, patch: ProfilePatch) -> Result<ProfileView, Error> {
        let patch = patch.validate().map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "reason": err.to_string() }))
        })?;
        let write = ProfileWrite {
            user_id: identity.id.clone(),
            email: identity.email.clone(),
            patch,
            at: self.clock.utc(),
        };
        let record = self.repo.merge(&write).await.map_err(map_save_error)?;
        Ok(ProfileView::merged(identity, Some(&record), write.at))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockProfileRepository;
    use crate::test_support::{MutableClock, fixture_identity, fixture_timestamp};
    use rstest::rstest;

    fn service(repo: MockProfileRepository) -> ProfileService<MockProfileRepository> {
        ProfileService::new(
            Arc::new(repo),
            Arc::new(MutableClock::new(fixture_timestamp())),
        )
    }

    #[rstest]
    #[case(ProfileRepositoryError::permission_denied(), ErrorCode::Forbidden, PROFILE_PERMISSION_DENIED)]
    #[case(ProfileRepositoryError::unauthenticated(), ErrorCode::Unauthorized, PROFILE_UNAUTHENTICATED)]
    #[case(ProfileRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable, PROFILE_SAVE_FAILED)]
    #[case(ProfileRepositoryError::query("syntax"), ErrorCode::ServiceUnavailable, PROFILE_SAVE_FAILED)]
    #[tokio::test]
    async fn save_errors_are_classified(
        #[case] failure: ProfileRepositoryError,
        #[case] code: ErrorCode,
        #[case] message: &str,
    ) {
        let mut repo = MockProfileRepository::new();
        repo.expect_merge()
            .times(1)
            .return_once(move |_| Err(failure));

        let err = service(repo)
            .save(&fixture_identity(), ProfilePatch::default())
            .await
            .expect_err("save fails");
        assert_eq!(err.code(), code);
        assert_eq!(err.message(), message);
    }

    #[tokio::test]
    async fn save_stamps_identity_and_time() {
        let mut repo = MockProfileRepository::new();
        repo.expect_merge()
            .withf(|write| {
                write.user_id.as_ref() == "uid-asha"
                    && write.email.as_ref() == "asha@example.com"
                    && write.at == fixture_timestamp()
                    && write.patch.age == Some(27)
                    && write.patch.full_name.is_none()
            })
            .times(1)
            .returning(|write| Ok(write.apply(None)));

        let view = service(repo)
            .save(
                &fixture_identity(),
                ProfilePatch {
                    age: Some(27),
                    ..ProfilePatch::default()
                },
            )
            .await
            .expect("save succeeds");
        assert_eq!(view.age, Some(27));
        assert_eq!(view.updated_at, fixture_timestamp());
    }

    #[tokio::test]
    async fn invalid_patch_never_reaches_store() {
        let mut repo = MockProfileRepository::new();
        repo.expect_merge().times(0);

        let err = service(repo)
            .save(
                &fixture_identity(),
                ProfilePatch {
                    age: Some(0),
                    ..ProfilePatch::default()
                },
            )
            .await
            .expect_err("invalid age");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn load_failure_uses_load_message() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find()
            .times(1)
            .return_once(|_| Err(ProfileRepositoryError::connection("down")));

        let err = service(repo)
            .load(&fixture_identity())
            .await
            .expect_err("load fails");
        assert_eq!(err.message(), PROFILE_LOAD_FAILED);
    }

    #[tokio::test]
    async fn load_without_record_returns_defaults() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find().times(1).return_once(|_| Ok(None));

        let view = service(repo)
            .load(&fixture_identity())
            .await
            .expect("load succeeds");
        assert_eq!(view, ProfileView::defaults(&fixture_identity(), fixture_timestamp()));
    }
}
