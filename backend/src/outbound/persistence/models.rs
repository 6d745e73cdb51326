//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{calculations, users};

/// Public columns of the users table. The password hash is never read back.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the calculations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = calculations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CalculationRow {
    pub id: i64,
    pub operation: String,
    pub operand_a: f64,
    pub operand_b: f64,
    pub result: f64,
    pub timestamp: DateTime<Utc>,
    pub user_id: i64,
}

/// Insertable struct for recording a calculation. `timestamp` is left to the
/// column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = calculations)]
pub(crate) struct NewCalculationRow<'a> {
    pub operation: &'a str,
    pub operand_a: f64,
    pub operand_b: f64,
    pub result: f64,
    pub user_id: i64,
}
