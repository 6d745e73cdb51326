//! Tests for HTTP error mapping.

use super::*;
use crate::domain::FieldError;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error_case() -> Error {
    Error::internal("connection string postgres://secret@db")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"secret": "x"}))
}

async fn body_json(error: &Error) -> Value {
    let response = ResponseError::error_response(error);
    let bytes = to_bytes(response.into_body()).await.expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::validation("invalid", Vec::new()), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::division_by_zero("Cannot divide by zero"), StatusCode::BAD_REQUEST)]
#[case(Error::conflict("exists"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn division_by_zero_body_uses_detail() {
    let error = Error::division_by_zero("Cannot divide by zero");
    let body = body_json(&error).await;

    assert_eq!(body["code"], "division_by_zero");
    assert_eq!(body["detail"], "Cannot divide by zero");
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace(internal_error_case: Error) {
    let response = ResponseError::error_response(&internal_error_case);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(header.as_deref(), Some(TRACE_ID));

    let body = body_json(&internal_error_case).await;
    assert_eq!(body["detail"], "Internal server error");
    assert_eq!(body["traceId"], TRACE_ID);
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn validation_details_are_preserved() {
    let error = Error::validation(
        "request validation failed",
        vec![FieldError::new("x", "invalid_type", "x must be a number")],
    );
    let body = body_json(&error).await;

    assert_eq!(body["code"], "validation_failed");
    assert_eq!(body["details"]["errors"][0]["field"], "x");
}

#[rstest]
fn actix_errors_become_internal() {
    let actix_error = actix_web::error::ErrorBadGateway("upstream");
    let error = Error::from(actix_error);

    assert_eq!(error.code(), ErrorCode::InternalError);
}
