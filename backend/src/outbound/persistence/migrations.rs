//! Embedded schema migrations applied at startup.
//!
//! Migrations run on a synchronous connection inside `spawn_blocking` so the
//! async runtime is never blocked during boot.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub(crate) const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures while bringing the schema up to date.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not open a connection to the database.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },

    /// A migration failed to apply.
    #[error("failed to run migrations: {message}")]
    Migration { message: String },
}

impl MigrationError {
    fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    fn migration(message: impl Into<String>) -> Self {
        Self::Migration {
            message: message.into(),
        }
    }
}

/// Apply any pending migrations against the given database.
///
/// # Errors
/// Returns [`MigrationError::Connection`] when the database is unreachable
/// and [`MigrationError::Migration`] when a migration fails to apply.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url)
            .map_err(|err| MigrationError::connection(err.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::migration(err.to_string()))?;
        Ok(())
    })
    .await
    .map_err(|err| MigrationError::migration(err.to_string()))?
}
