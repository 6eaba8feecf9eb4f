//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::AppConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::api::health::{HealthState, live, ready};
use crate::inbound::http::guests::{admin_login, checkin, home, list_guests, register};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use state_builders::build_http_state;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(home)
        .service(register)
        .service(checkin)
        .service(list_guests)
        .service(admin_login)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Build the Prometheus middleware serving request metrics at `/metrics`.
#[cfg(feature = "metrics")]
fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("registration_backend")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("Prometheus metrics setup failed: {err}")))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: loaded [`AppConfig`] carrying binding, database, and relay settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when the bind address is malformed or when
/// binding the socket fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: AppConfig,
) -> std::io::Result<Server> {
    let bind_addr = config
        .bind_addr()
        .map_err(|err| std::io::Error::other(format!("invalid http_addr: {err}")))?;
    let http_state = web::Data::new(build_http_state(&config).await);
    let server_health_state = health_state.clone();
    #[cfg(feature = "metrics")]
    let prometheus = build_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
