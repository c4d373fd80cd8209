//! PostgreSQL-backed `ProfileRepository`.
//!
//! Saves are a single `INSERT .. ON CONFLICT DO UPDATE`; the changeset only
//! names the columns present in the write, so unrelated fields survive.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Email, ProfileRecord, ProfileWrite, UserId};

use super::error_mapping::{map_profile_diesel_error, map_profile_pool_error};
use super::models::{NewProfileRow, ProfileChangeset, ProfileRow};
use super::pool::DbPool;
use super::schema::profiles;

/// Diesel-backed implementation of the `ProfileRepository` port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: ProfileRow) -> Result<ProfileRecord, ProfileRepositoryError> {
    let user_id = UserId::new(row.user_id)
        .map_err(|err| ProfileRepositoryError::query(format!("stored user id: {err}")))?;
    let age = row
        .age
        .map(u8::try_from)
        .transpose()
        .map_err(|err| ProfileRepositoryError::query(format!("stored age: {err}")))?;
    let email = row
        .email
        .map(Email::new)
        .transpose()
        .map_err(|err| ProfileRepositoryError::query(format!("stored email: {err}")))?;
    Ok(ProfileRecord {
        user_id,
        full_name: row.full_name,
        age,
        city: row.city,
        email,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_profile_pool_error)?;
        let row = profiles::table
            .filter(profiles::user_id.eq(user_id.as_ref()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_profile_diesel_error)?;
        row.map(row_to_record).transpose()
    }

    async fn merge(&self, write: &ProfileWrite) -> Result<ProfileRecord, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_profile_pool_error)?;
        let patch = &write.patch;
        let age = patch.age.map(i16::from);
        let new_row = NewProfileRow {
            user_id: write.user_id.as_ref(),
            full_name: patch.full_name.as_deref(),
            age,
            city: patch.city.as_deref(),
            email: Some(write.email.as_ref()),
            created_at: write.at,
            updated_at: write.at,
        };
        let changes = ProfileChangeset {
            full_name: patch.full_name.as_deref(),
            age,
            city: patch.city.as_deref(),
            email: Some(write.email.as_ref()),
            updated_at: write.at,
        };

        let row = diesel::insert_into(profiles::table)
            .values(&new_row)
            .on_conflict(profiles::user_id)
            .do_update()
            .set(&changes)
            .returning(ProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_profile_diesel_error)?;
        row_to_record(row)
    }
}

