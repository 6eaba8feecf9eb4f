//! Guest registration, check-in, and admin endpoints.
//!
//! ```text
//! POST /register {"name":"Alice","email":"alice@x.com"}
//! POST /checkin {"guest_id":"<uuid>"}
//! GET /guests
//! POST /admin-login {"password":"..."}
//! ```

use actix_web::{HttpResponse, get, post, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Guest, GuestEmail, GuestId, GuestName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_email_error, missing_field_error, require_trimmed,
};

const NAME_FIELD: FieldName = FieldName::new("name");
const EMAIL_FIELD: FieldName = FieldName::new("email");
const GUEST_ID_FIELD: FieldName = FieldName::new("guest_id");

/// Plain-text liveness string for the root path.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service liveness string", body = String)),
    tags = ["guests"],
    operation_id = "home"
)]
#[get("/")]
pub async fn home() -> &'static str {
    "Event registration backend is running"
}

/// Registration request body for `POST /register`.
///
/// Both fields are optional at the serde layer so missing keys surface as a
/// structured validation error instead of a deserialisation failure.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Guest display name.
    pub name: Option<String>,
    /// Guest email address; the natural external key.
    pub email: Option<String>,
}

/// Successful registration response.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    /// Fixed confirmation message.
    pub message: String,
    /// The server-generated guest identifier.
    pub guest_id: String,
    /// The QR image as a `data:image/png;base64,` URI for fallback display.
    pub qr_code_image: String,
}

/// Register a guest and email them a QR code encoding their id.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Guest registered and notified", body = RegisterResponse),
        (status = 400, description = "Missing fields or duplicate email", body = Error),
        (status = 500, description = "Store or notification failure", body = Error)
    ),
    tags = ["guests"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest { name, email } = payload.into_inner();
    let name = GuestName::new(require_trimmed(name, NAME_FIELD)?)
        .map_err(|_| missing_field_error(NAME_FIELD))?;
    let email = GuestEmail::new(require_trimmed(email, EMAIL_FIELD)?)
        .map_err(|_| invalid_email_error(EMAIL_FIELD))?;

    let confirmation = state.registration.register(name, email).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "Registration successful".to_owned(),
        guest_id: confirmation.guest_id.to_string(),
        qr_code_image: format!(
            "data:image/png;base64,{}",
            BASE64.encode(&confirmation.qr_png)
        ),
    }))
}

/// Check-in request body for `POST /checkin`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CheckinRequest {
    /// The identifier scanned from the guest's QR code.
    pub guest_id: Option<String>,
}

/// Simple message envelope returned by check-in.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Mark a guest as arrived.
///
/// Repeated check-ins succeed; a missing id is a validation error while an
/// unknown or malformed id reads as an absent guest.
#[utoipa::path(
    post,
    path = "/checkin",
    request_body = CheckinRequest,
    responses(
        (status = 200, description = "Guest checked in", body = MessageResponse),
        (status = 400, description = "Missing guest id", body = Error),
        (status = 404, description = "Unknown guest id", body = Error)
    ),
    tags = ["guests"],
    operation_id = "checkin"
)]
#[post("/checkin")]
pub async fn checkin(
    state: web::Data<HttpState>,
    payload: web::Json<CheckinRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let raw = require_trimmed(payload.into_inner().guest_id, GUEST_ID_FIELD)?;
    // A malformed identifier cannot name any guest, so it reads as not found
    // rather than as a request-shape error.
    let guest_id = GuestId::parse(&raw).map_err(|_| Error::not_found("Guest not found"))?;

    state.registration.check_in(guest_id).await?;

    Ok(web::Json(MessageResponse {
        message: format!("{guest_id} checked in"),
    }))
}

/// A guest record as returned by the admin listing.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct GuestRecord {
    /// Unique identifier and QR payload.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Payload embedded in the QR image; equal to `id`.
    pub qr_code_data: String,
    /// Whether the guest has arrived.
    pub checked_in: bool,
    /// Creation time assigned by the store.
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<Guest> for GuestRecord {
    fn from(guest: Guest) -> Self {
        Self {
            id: guest.id().to_string(),
            name: guest.name().as_str().to_owned(),
            email: guest.email().as_str().to_owned(),
            qr_code_data: guest.qr_code_data(),
            checked_in: guest.checked_in(),
            timestamp: guest.registered_at(),
        }
    }
}

/// List all guest records.
///
/// Unauthenticated, preserving the external contract of the original
/// deployment; the gap is recorded in the design notes rather than silently
/// replicated as intent.
#[utoipa::path(
    get,
    path = "/guests",
    responses(
        (status = 200, description = "All guest records", body = [GuestRecord]),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["guests"],
    operation_id = "listGuests"
)]
#[get("/guests")]
pub async fn list_guests(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<GuestRecord>>> {
    let guests = state.registration.list_guests().await?;
    Ok(web::Json(guests.into_iter().map(GuestRecord::from).collect()))
}

/// Admin login request body for `POST /admin-login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AdminLoginRequest {
    /// Candidate shared secret.
    pub password: Option<String>,
}

/// Admin login success envelope.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AdminLoginResponse {
    /// Always `"success"` on a 200 response.
    pub status: String,
}

/// Validate the static admin password.
///
/// No session or token is issued; callers re-send the password with each
/// protected action. An absent password is treated as a mismatch.
#[utoipa::path(
    post,
    path = "/admin-login",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Password accepted", body = AdminLoginResponse),
        (status = 401, description = "Password rejected", body = Error)
    ),
    tags = ["guests"],
    operation_id = "adminLogin"
)]
#[post("/admin-login")]
pub async fn admin_login(
    state: web::Data<HttpState>,
    payload: web::Json<AdminLoginRequest>,
) -> ApiResult<web::Json<AdminLoginResponse>> {
    let candidate = payload.into_inner().password.unwrap_or_default();
    if state.admin.verify(&candidate) {
        Ok(web::Json(AdminLoginResponse {
            status: "success".to_owned(),
        }))
    } else {
        Err(Error::unauthorized("Invalid password"))
    }
}
