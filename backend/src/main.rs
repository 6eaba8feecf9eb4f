//! Backend entry-point: loads configuration and drives the HTTP server.

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use ortho_config::OrthoConfig;
use registration_backend::api::health::HealthState;
use registration_backend::server::{AppConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;

    let config = AppConfig::load_from_iter(std::env::args_os())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    server.await?;
    Ok(())
}
