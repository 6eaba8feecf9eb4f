//! Application configuration loaded via OrthoConfig.
//!
//! Every field is optional so the service boots in degraded mode on an empty
//! environment: without a database URL it serves from an in-memory store, and
//! without SMTP credentials registrations fail at the notification step.

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::AdminSecret;
use crate::outbound::email::SmtpSettings;

const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ADMIN_PASSWORD: &str = "supersecret";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration values for the registration backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REG")]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    pub http_addr: Option<String>,
    /// PostgreSQL connection URL; absent means the in-memory store.
    pub database_url: Option<String>,
    /// Static admin password for the login endpoint.
    pub admin_password: Option<String>,
    /// SMTP relay hostname.
    pub smtp_server: Option<String>,
    /// SMTP relay port.
    pub smtp_port: Option<u16>,
    /// SMTP authentication username, also the default sender address.
    pub smtp_username: Option<String>,
    /// SMTP authentication password.
    pub smtp_password: Option<String>,
    /// Sender address when it differs from the SMTP username.
    pub smtp_from: Option<String>,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
}

impl AppConfig {
    /// Return the configured bind address, falling back to the default.
    #[must_use]
    pub fn http_addr(&self) -> &str {
        self.http_addr.as_deref().unwrap_or(DEFAULT_HTTP_ADDR)
    }

    /// Parse the bind address into a socket address.
    ///
    /// # Errors
    /// Returns the parse error when the configured address is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.http_addr().parse()
    }

    /// Return the admin shared secret, falling back to the default.
    #[must_use]
    pub fn admin_secret(&self) -> AdminSecret {
        AdminSecret::new(
            self.admin_password
                .as_deref()
                .unwrap_or(DEFAULT_ADMIN_PASSWORD),
        )
    }

    /// Return the tracing filter, falling back to the default.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Assemble SMTP settings when the relay is fully configured.
    ///
    /// Server, username, and password are all required; a partially
    /// configured relay is treated as no relay at all.
    #[must_use]
    pub fn smtp(&self) -> Option<SmtpSettings> {
        match (&self.smtp_server, &self.smtp_username, &self.smtp_password) {
            (Some(server), Some(username), Some(password)) => Some(SmtpSettings {
                server: server.clone(),
                port: self.smtp_port.unwrap_or(DEFAULT_SMTP_PORT),
                username: username.clone(),
                password: password.clone(),
                from_address: self.smtp_from.clone(),
            }),
            _ => None,
        }
    }
}
