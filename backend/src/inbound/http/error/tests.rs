//! Tests for the HTTP status mapping and internal-error redaction.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::{Error, ErrorCode};

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("Invalid password"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("Guest not found"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn each_code_maps_to_its_status(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(error.status_code(), expected);
}

async fn response_body(error: &Error) -> Value {
    let response = error.error_response();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("error body is JSON")
}

#[actix_web::test]
async fn internal_errors_are_redacted_in_the_body() {
    let error = Error::internal("database password rejected").with_details(json!({"dsn": "x"}));
    let body = response_body(&error).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("Internal server error")
    );
    assert!(body.get("details").is_none());
}

#[actix_web::test]
async fn client_errors_keep_their_message_and_details() {
    let error = Error::invalid_request("This email is already registered")
        .with_details(json!({"field": "email", "code": "already_registered"}));
    let body = response_body(&error).await;
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("This email is already registered")
    );
    let details = body.get("details").expect("details survive");
    assert_eq!(
        details.get("code").and_then(Value::as_str),
        Some("already_registered")
    );
}

#[actix_web::test]
async fn trace_id_survives_redaction_and_reaches_the_header() {
    const TRACE: &str = "00000000-0000-0000-0000-000000000000";
    let error = Error::internal("boom").with_trace_id(TRACE);
    let response = error.error_response();
    let header = response
        .headers()
        .get("trace-id")
        .expect("trace-id header set")
        .to_str()
        .expect("header is ascii")
        .to_owned();
    assert_eq!(header, TRACE);
    let body = response_body(&error).await;
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(TRACE));
}

#[rstest]
fn promoted_actix_errors_become_internal() {
    let promoted: Error = actix_web::error::ErrorImATeapot("teapot").into();
    assert_eq!(promoted.code(), ErrorCode::InternalError);
}
