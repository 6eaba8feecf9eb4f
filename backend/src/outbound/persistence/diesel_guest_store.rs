//! PostgreSQL-backed `GuestStore` implementation using Diesel ORM.
//!
//! A thin adapter translating between Diesel row structs and the domain's
//! guest types. The email uniqueness constraint lives in the database; this
//! adapter only maps its violation into the port's duplicate variant.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{GuestStore, GuestStoreError};
use crate::domain::{Guest, GuestEmail, GuestId, GuestName, NewGuest};

use super::models::{GuestRow, NewGuestRow};
use super::pool::{DbPool, PoolError};
use super::schema::guests;

/// Diesel-backed implementation of the `GuestStore` port.
#[derive(Clone)]
pub struct DieselGuestStore {
    pool: DbPool,
}

impl DieselGuestStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain guest store errors.
fn map_pool_error(error: PoolError) -> GuestStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            GuestStoreError::connection(message)
        }
    }
}

/// Map Diesel errors to domain guest store errors.
///
/// The unique violation on the email column is the authoritative duplicate
/// guard; the workflow's pre-check only narrows the race window.
fn map_diesel_error(error: diesel::result::Error, email: &GuestEmail) -> GuestStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            GuestStoreError::duplicate_email(email.as_str())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            GuestStoreError::connection("database connection error")
        }
        DieselError::NotFound => GuestStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => GuestStoreError::query("database query error"),
        _ => GuestStoreError::query("database error"),
    }
}

/// Map Diesel errors for operations where a unique violation cannot occur.
fn map_read_error(error: diesel::result::Error) -> GuestStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            GuestStoreError::connection("database connection error")
        }
        DieselError::NotFound => GuestStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => GuestStoreError::query("database query error"),
        _ => GuestStoreError::query("database error"),
    }
}

/// Convert a database row to a domain guest.
///
/// Rows are written exclusively through the validated domain types, so a
/// parse failure here means the table was modified out of band.
fn row_to_guest(row: GuestRow) -> Result<Guest, GuestStoreError> {
    let id = GuestId::parse(&row.id)
        .map_err(|_| GuestStoreError::query("corrupt guest row: invalid id"))?;
    let name = GuestName::new(row.name)
        .map_err(|_| GuestStoreError::query("corrupt guest row: invalid name"))?;
    let email = GuestEmail::new(row.email)
        .map_err(|_| GuestStoreError::query("corrupt guest row: invalid email"))?;
    Ok(Guest::from_parts(
        id,
        name,
        email,
        row.checked_in,
        Some(row.timestamp),
    ))
}

#[async_trait]
impl GuestStore for DieselGuestStore {
    async fn find_by_email(&self, email: &GuestEmail) -> Result<Option<Guest>, GuestStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<GuestRow> = guests::table
            .filter(guests::email.eq(email.as_str()))
            .select(GuestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_guest).transpose()
    }

    async fn insert(&self, guest: NewGuest) -> Result<Guest, GuestStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = guest.id().to_string();
        let qr_code_data = guest.qr_code_data();
        let new_row = NewGuestRow {
            id: &id,
            name: guest.name().as_str(),
            email: guest.email().as_str(),
            qr_code_data: &qr_code_data,
        };

        let row: GuestRow = diesel::insert_into(guests::table)
            .values(&new_row)
            .returning(GuestRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, guest.email()))?;

        row_to_guest(row)
    }

    async fn find_by_id(&self, id: &GuestId) -> Result<Option<Guest>, GuestStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<GuestRow> = guests::table
            .find(id.to_string())
            .select(GuestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_guest).transpose()
    }

    async fn mark_checked_in(&self, id: &GuestId) -> Result<(), GuestStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(guests::table.find(id.to_string()))
            .set(guests::checked_in.eq(true))
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;

        if updated == 0 {
            return Err(GuestStoreError::not_found(id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &GuestId) -> Result<(), GuestStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Compensating removal; an already-absent row is not an error.
        diesel::delete(guests::table.find(id.to_string()))
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Guest>, GuestStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<GuestRow> = guests::table
            .order(guests::timestamp.asc())
            .select(GuestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_guest).collect()
    }
}
