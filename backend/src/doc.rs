//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers the guest endpoints, the
//! health probes, and the request/response schemas they reference.
//!
//! The generated specification is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::guests::{
    AdminLoginRequest, AdminLoginResponse, CheckinRequest, GuestRecord, MessageResponse,
    RegisterRequest, RegisterResponse,
};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event registration backend API",
        description = "HTTP interface for guest registration, QR check-in, and admin access.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::guests::home,
        crate::inbound::http::guests::register,
        crate::inbound::http::guests::checkin,
        crate::inbound::http::guests::list_guests,
        crate::inbound::http::guests::admin_login,
        crate::api::health::ready,
        crate::api::health::live,
    ),
    components(schemas(
        RegisterRequest,
        RegisterResponse,
        CheckinRequest,
        MessageResponse,
        GuestRecord,
        AdminLoginRequest,
        AdminLoginResponse,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "guests", description = "Guest registration and check-in"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
