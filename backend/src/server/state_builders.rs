//! Builders assembling the workflow service and its adapters from config.
//!
//! Missing configuration degrades rather than aborts: without a database URL
//! the in-memory store serves requests, and without SMTP credentials every
//! registration fails at the notification step and rolls back. A configured
//! but unreachable database still gets the database-backed store, so requests
//! fail individually until it recovers rather than landing in memory.

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::RegistrationService;
use crate::domain::ports::{DisabledNotifier, FixtureGuestStore, GuestStore, Notifier};
use crate::inbound::http::state::HttpState;
use crate::outbound::email::SmtpNotifier;
use crate::outbound::persistence::{
    DbPool, DieselGuestStore, PoolConfig, run_pending_migrations,
};
use crate::outbound::qr::PngQrRenderer;

use super::AppConfig;

/// Build the guest store, preferring PostgreSQL when a URL is configured.
async fn build_guest_store(config: &AppConfig) -> Arc<dyn GuestStore> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("no database URL configured; guest records are held in memory");
        return Arc::new(FixtureGuestStore::new());
    };

    if let Err(err) = run_pending_migrations(database_url).await {
        // The schema may already be current from a previous boot; serve
        // traffic and let per-request errors surface any real gap.
        error!(error = %err, "schema migration failed at startup");
    }

    database_store(PoolConfig::new(database_url)).await
}

/// Build the database-backed store, tolerating an unreachable server.
///
/// A pool that cannot establish its initial connections is rebuilt without
/// the connectivity check: the store stays wired and every request surfaces
/// a connection error until the database recovers.
async fn database_store(pool_config: PoolConfig) -> Arc<dyn GuestStore> {
    match DbPool::new(pool_config.clone()).await {
        Ok(pool) => Arc::new(DieselGuestStore::new(pool)),
        Err(err) => {
            error!(error = %err, "database unreachable at startup; requests will fail until it recovers");
            Arc::new(DieselGuestStore::new(DbPool::new_unchecked(pool_config)))
        }
    }
}

/// Build the notifier, preferring the SMTP relay when fully configured.
fn build_notifier(config: &AppConfig) -> Arc<dyn Notifier> {
    let Some(settings) = config.smtp() else {
        warn!("SMTP relay not configured; registrations will fail at the notification step");
        return Arc::new(DisabledNotifier);
    };

    match SmtpNotifier::new(settings) {
        Ok(notifier) => Arc::new(notifier),
        Err(err) => {
            error!(error = %err, "SMTP settings rejected; registrations will fail at the notification step");
            Arc::new(DisabledNotifier)
        }
    }
}

/// Assemble the HTTP handler state from configuration.
pub(super) async fn build_http_state(config: &AppConfig) -> HttpState {
    let store = build_guest_store(config).await;
    let notifier = build_notifier(config);
    let service = RegistrationService::new(store, Arc::new(PngQrRenderer::new()), notifier);
    HttpState::new(Arc::new(service), config.admin_secret())
}

#[cfg(test)]
mod tests {
    //! Degraded-startup coverage: state assembly on an empty configuration.

    use std::ffi::OsString;
    use std::time::Duration;

    use env_lock::lock_env;
    use ortho_config::OrthoConfig;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::GuestStoreError;
    use crate::domain::{GuestEmail, GuestName};

    fn empty_config() -> AppConfig {
        let _guard = lock_env([
            ("REG_HTTP_ADDR", None::<String>),
            ("REG_DATABASE_URL", None),
            ("REG_ADMIN_PASSWORD", None),
            ("REG_SMTP_SERVER", None),
            ("REG_SMTP_PORT", None),
            ("REG_SMTP_USERNAME", None),
            ("REG_SMTP_PASSWORD", None),
            ("REG_SMTP_FROM", None),
            ("REG_LOG_FILTER", None),
        ]);
        AppConfig::load_from_iter([OsString::from("registration-backend")])
            .expect("config should load")
    }

    #[rstest]
    #[tokio::test]
    async fn empty_config_serves_from_memory_with_disabled_notifier() {
        let state = build_http_state(&empty_config()).await;

        // The store works; the notifier fails, so registration rolls back.
        let err = state
            .registration
            .register(
                GuestName::new("Alice").expect("valid name"),
                GuestEmail::new("alice@x.com").expect("valid email"),
            )
            .await
            .expect_err("disabled notifier fails the registration");
        assert_eq!(err.code(), crate::domain::ErrorCode::InternalError);
        assert!(
            state
                .registration
                .list_guests()
                .await
                .expect("listing succeeds")
                .is_empty()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_database_keeps_the_database_store() {
        let pool_config = PoolConfig::new("postgres://nobody@127.0.0.1:1/guests")
            .with_connection_timeout(Duration::from_millis(200));

        let store = database_store(pool_config).await;

        // Requests surface connection errors; nothing is served from memory.
        let err = store
            .list_all()
            .await
            .expect_err("listing fails while the database is down");
        assert!(matches!(err, GuestStoreError::Connection { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn default_admin_secret_is_wired() {
        let state = build_http_state(&empty_config()).await;
        assert!(state.admin.verify("supersecret"));
    }
}
