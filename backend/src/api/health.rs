//! Health endpoints: liveness & readiness probes for orchestration and load balancers.
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Shared health state for readiness and liveness checks.
/// Track readiness and whether the process should report itself as alive to orchestrators.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail fast during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state. When false, liveness probes emit 503 to trigger restarts.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe. Return 200 when dependencies are initialised and the server can handle traffic; return 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once draining.
/// Call `HealthState::mark_unhealthy` before graceful shutdown to surface the drain early.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};
    use rstest::rstest;

    use super::*;

    async fn probe(state: HealthState, path: &str) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(ready)
                .service(live),
        )
        .await;
        test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_starts_unavailable() {
        let res = probe(HealthState::new(), "/health/ready").await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(b"no-store".as_slice())
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_flips_after_mark_ready() {
        let state = HealthState::new();
        state.mark_ready();
        let res = probe(state, "/health/ready").await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_starts_alive_and_drains() {
        let res = probe(HealthState::new(), "/health/live").await;
        assert_eq!(res.status(), StatusCode::OK);

        let state = HealthState::new();
        state.mark_unhealthy();
        let res = probe(state, "/health/live").await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
