//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;
use uuid::Uuid;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::division_by_zero("Cannot divide by zero"), ErrorCode::DivisionByZero)]
#[case(Error::conflict("already exists"), ErrorCode::Conflict)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id = TraceId::from_uuid(Uuid::nil());
    let error = TraceId::scope(trace_id, async { Error::conflict("exists") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_message_as_detail() {
    let error = Error::division_by_zero("Cannot divide by zero").with_trace_id(TRACE_ID);
    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(
        value,
        json!({
            "code": "division_by_zero",
            "detail": "Cannot divide by zero",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
fn validation_lists_field_errors() {
    let error = Error::validation(
        "request validation failed",
        vec![FieldError::new("username", "too_short", "username is too short")],
    );

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    let errors = error
        .details()
        .and_then(|details| details.get("errors"))
        .and_then(|errors| errors.as_array())
        .expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "username");
    assert_eq!(errors[0]["code"], "too_short");
}

#[rstest]
fn display_uses_message(base_error: Error) {
    assert_eq!(base_error.to_string(), "bad");
}
