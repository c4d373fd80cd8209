//! Translation of pool and Diesel failures into repository port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{PaymentRepositoryError, ProfileRepositoryError};

use super::pool::PoolError;

fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }
}

/// SQLSTATE 42501 surfaces as an unclassified database error.
fn is_permission_denied(message: &str) -> bool {
    message.to_lowercase().contains("permission denied")
}

pub(crate) fn map_profile_pool_error(error: PoolError) -> ProfileRepositoryError {
    if error.is_authentication_failure() {
        return ProfileRepositoryError::unauthenticated();
    }
    ProfileRepositoryError::connection(error.message())
}

pub(crate) fn map_profile_diesel_error(error: DieselError) -> ProfileRepositoryError {
    log_diesel_error(&error);
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ProfileRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) if is_permission_denied(info.message()) => {
            ProfileRepositoryError::permission_denied()
        }
        DieselError::NotFound => ProfileRepositoryError::query("record not found"),
        _ => ProfileRepositoryError::query("database error"),
    }
}

pub(crate) fn map_payment_pool_error(error: PoolError) -> PaymentRepositoryError {
    PaymentRepositoryError::connection(error.message())
}

pub(crate) fn map_payment_diesel_error(error: DieselError) -> PaymentRepositoryError {
    log_diesel_error(&error);
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PaymentRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => PaymentRepositoryError::query("record not found"),
        _ => PaymentRepositoryError::query("database error"),
    }
}
