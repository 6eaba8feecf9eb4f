//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//! The `diesel print-schema` command can regenerate them from a live database.

diesel::table! {
    /// Guest registrations.
    ///
    /// One row per registered guest; email carries a unique constraint and is
    /// the natural external key.
    guests (id) {
        /// Primary key: canonical UUID string.
        id -> Varchar,
        /// Display name supplied at registration.
        name -> Varchar,
        /// Notification address; unique across all rows.
        email -> Varchar,
        /// Payload embedded in the QR image; equal to `id`.
        qr_code_data -> Varchar,
        /// Whether the guest has been scanned in at the venue.
        checked_in -> Bool,
        /// Row creation time assigned by the database.
        timestamp -> Timestamptz,
    }
}
