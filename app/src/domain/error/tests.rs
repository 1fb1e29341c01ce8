//! Tests for the domain error payload.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("no"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::conflict("clash"), ErrorCode::Conflict)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn reason_reads_details_field() {
    let error = Error::forbidden("too young").with_details(json!({ "reason": "underage" }));
    assert_eq!(error.reason(), Some("underage"));
}

#[rstest]
fn reason_is_none_without_details() {
    assert_eq!(Error::internal("boom").reason(), None);
}

#[rstest]
#[case(ErrorCode::InvalidRequest, "invalid_request")]
#[case(ErrorCode::NotFound, "not_found")]
#[case(ErrorCode::InternalError, "internal_error")]
fn as_str_is_snake_case(#[case] code: ErrorCode, #[case] expected: &str) {
    assert_eq!(code.as_str(), expected);
}

#[rstest]
fn display_shows_only_the_message() {
    let error = Error::conflict("This club has reached its maximum capacity.")
        .with_details(json!({ "reason": "full" }));
    assert_eq!(error.to_string(), "This club has reached its maximum capacity.");
    assert_eq!(error.details(), Some(&json!({ "reason": "full" })));
}
