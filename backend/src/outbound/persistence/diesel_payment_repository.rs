//! PostgreSQL-backed `PaymentRepository`.
//!
//! One row per user: a new attempt overwrites every column of the previous
//! one.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PaymentRepository, PaymentRepositoryError};
use crate::domain::{PaymentMethod, PaymentRecord, PaymentStatus, UserId};

use super::error_mapping::{map_payment_diesel_error, map_payment_pool_error};
use super::models::{NewPaymentRow, PaymentOverwrite, PaymentRow};
use super::pool::DbPool;
use super::schema::payments;

/// Diesel-backed implementation of the `PaymentRepository` port.
#[derive(Clone)]
pub struct DieselPaymentRepository {
    pool: DbPool,
}

impl DieselPaymentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: PaymentRow) -> Result<PaymentRecord, PaymentRepositoryError> {
    let user_id = UserId::new(row.user_id)
        .map_err(|err| PaymentRepositoryError::query(format!("stored user id: {err}")))?;
    let amount = u32::try_from(row.amount)
        .map_err(|err| PaymentRepositoryError::query(format!("stored amount: {err}")))?;
    let method = row
        .method
        .parse::<PaymentMethod>()
        .map_err(|err| PaymentRepositoryError::query(err.to_string()))?;
    Ok(PaymentRecord {
        user_id,
        amount,
        status: PaymentStatus::from(row.status),
        method,
        timestamp: row.recorded_at,
    })
}

fn amount_for_db(amount: u32) -> Result<i32, PaymentRepositoryError> {
    i32::try_from(amount)
        .map_err(|_| PaymentRepositoryError::query(format!("amount {amount} out of range")))
}

#[async_trait]
impl PaymentRepository for DieselPaymentRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<PaymentRecord>, PaymentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_payment_pool_error)?;
        let row = payments::table
            .filter(payments::user_id.eq(user_id.as_ref()))
            .select(PaymentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_payment_diesel_error)?;
        row.map(row_to_record).transpose()
    }

    async fn put(&self, record: &PaymentRecord) -> Result<(), PaymentRepositoryError> {
        let amount = amount_for_db(record.amount)?;
        let mut conn = self.pool.get().await.map_err(map_payment_pool_error)?;
        let new_row = NewPaymentRow {
            user_id: record.user_id.as_ref(),
            amount,
            status: record.status.as_str(),
            method: record.method.as_str(),
            recorded_at: record.timestamp,
        };
        let overwrite = PaymentOverwrite {
            amount,
            status: record.status.as_str(),
            method: record.method.as_str(),
            recorded_at: record.timestamp,
        };

        diesel::insert_into(payments::table)
            .values(&new_row)
            .on_conflict(payments::user_id)
            .do_update()
            .set(&overwrite)
            .execute(&mut conn)
            .await
            .map_err(map_payment_diesel_error)?;
        Ok(())
    }

    async fn update_status(
        &self,
        user_id: &UserId,
        status: &PaymentStatus,
    ) -> Result<Option<PaymentRecord>, PaymentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_payment_pool_error)?;
        let row = diesel::update(payments::table.filter(payments::user_id.eq(user_id.as_ref())))
            .set(payments::status.eq(status.as_str()))
            .returning(PaymentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_payment_diesel_error)?;
        row.map(row_to_record).transpose()
    }
}
