//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::guests;

/// Row struct for reading from the guests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = guests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GuestRow {
    pub id: String,
    pub name: String,
    pub email: String,
    #[expect(dead_code, reason = "always equal to id; kept for schema parity")]
    pub qr_code_data: String,
    pub checked_in: bool,
    pub timestamp: DateTime<Utc>,
}

/// Insertable struct for creating new guest records.
///
/// `checked_in` and `timestamp` are omitted so the database defaults apply.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = guests)]
pub(crate) struct NewGuestRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub qr_code_data: &'a str,
}
