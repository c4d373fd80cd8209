//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{payments, profiles};

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub user_id: String,
    pub full_name: Option<String>,
    pub age: Option<i16>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for a profile's first save.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub user_id: &'a str,
    pub full_name: Option<&'a str>,
    pub age: Option<i16>,
    pub city: Option<&'a str>,
    pub email: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied on later saves. `None` fields are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = profiles)]
pub(crate) struct ProfileChangeset<'a> {
    pub full_name: Option<&'a str>,
    pub age: Option<i16>,
    pub city: Option<&'a str>,
    pub email: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the payments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = payments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PaymentRow {
    pub user_id: String,
    pub amount: i32,
    pub status: String,
    pub method: String,
    pub recorded_at: DateTime<Utc>,
}

/// Insertable struct for a payment attempt.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payments)]
pub(crate) struct NewPaymentRow<'a> {
    pub user_id: &'a str,
    pub amount: i32,
    pub status: &'a str,
    pub method: &'a str,
    pub recorded_at: DateTime<Utc>,
}

/// Full overwrite of an existing attempt.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = payments)]
pub(crate) struct PaymentOverwrite<'a> {
    pub amount: i32,
    pub status: &'a str,
    pub method: &'a str,
    pub recorded_at: DateTime<Utc>,
}
