//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementation of the guest store port backed by PostgreSQL via
//! the Diesel ORM with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! The adapter is deliberately thin: Diesel row structs (`models.rs`) and
//! schema definitions (`schema.rs`) stay internal, and every database error
//! is mapped to a port-level error before it reaches the domain.

mod diesel_guest_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_guest_store::DieselGuestStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
