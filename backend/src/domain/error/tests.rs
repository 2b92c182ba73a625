//! Tests for the error payload and trace propagation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(ErrorCode::InvalidRequest, "invalid_request")]
#[case(ErrorCode::Conflict, "conflict")]
#[case(ErrorCode::ServiceUnavailable, "service_unavailable")]
fn codes_serialize_as_snake_case(#[case] code: ErrorCode, #[case] expected: &str) {
    let value = serde_json::to_value(code).expect("code serializes");
    assert_eq!(value, json!(expected));
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_falls_back_to_generic_message_for_blank_input() {
    let error = Error::new(ErrorCode::InternalError, "");
    assert_eq!(error.message(), "Unexpected error");
}

#[rstest]
fn try_with_trace_id_rejects_empty_values() {
    let result = Error::invalid_request("bad").try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::conflict("taken") }).await;
    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serializes_without_empty_optionals() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("serializes");
    assert_eq!(value, json!({ "code": "not_found", "message": "missing" }));
}

#[rstest]
fn deserializes_and_validates(expected_trace_id: String) {
    let payload = json!({
        "code": "invalid_request",
        "message": "bad",
        "traceId": expected_trace_id,
        "details": { "field": "name" }
    });
    let error: Error = serde_json::from_value(payload).expect("valid payload");
    assert_eq!(error.trace_id(), Some(TRACE_ID));
    assert_eq!(error.details(), Some(&json!({ "field": "name" })));

    let blank = json!({ "code": "invalid_request", "message": " " });
    assert!(serde_json::from_value::<Error>(blank).is_err());
}
