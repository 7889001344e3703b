use super::*;
use serde_json::json;

use crate::net::types::Author;

// =============================================================================
// parse_response
// =============================================================================

#[test]
fn returns_data_on_success() {
    let data = parse_response(200, r#"{"data":{"ping":true}}"#).unwrap();
    assert_eq!(data, json!({ "ping": true }));
}

#[test]
fn graphql_errors_are_joined() {
    let body = json!({
        "data": null,
        "errors": [{ "message": "Invalid credentials" }, { "message": "second" }]
    })
    .to_string();
    let err = parse_response(200, &body).unwrap_err();
    assert_eq!(err, NetError::Graphql("Invalid credentials\nsecond".into()));
}

#[test]
fn graphql_errors_win_over_http_status() {
    let body = json!({ "errors": [{ "message": "Forbidden" }] }).to_string();
    let err = parse_response(403, &body).unwrap_err();
    assert_eq!(err.to_string(), "Forbidden");
}

#[test]
fn non_json_error_status_reports_status_code() {
    let err = parse_response(502, "<html>bad gateway</html>").unwrap_err();
    assert_eq!(err, NetError::Status(502));
    assert_eq!(err.to_string(), "Response not successful: Received status code 502");
}

#[test]
fn json_error_status_without_errors_reports_status_code() {
    let err = parse_response(500, r#"{"data":null}"#).unwrap_err();
    assert_eq!(err, NetError::Status(500));
}

#[test]
fn malformed_success_body_is_parse_error() {
    assert!(matches!(parse_response(200, "not json"), Err(NetError::Parse(_))));
}

#[test]
fn null_data_is_missing_data() {
    assert_eq!(parse_response(200, r#"{"data":null}"#), Err(NetError::MissingData));
    assert_eq!(parse_response(200, "{}"), Err(NetError::MissingData));
}

#[test]
fn partial_data_with_errors_is_an_error() {
    let body = json!({ "data": { "ping": null }, "errors": [{ "message": "Unauthorized" }] }).to_string();
    assert_eq!(parse_response(200, &body), Err(NetError::Graphql("Unauthorized".into())));
}

// =============================================================================
// decode_field
// =============================================================================

#[test]
fn decode_field_reads_nullable_identity() {
    let data = json!({ "me": null });
    let me: Option<gate::Identity> = decode_field(&data, "me").unwrap();
    assert!(me.is_none());
}

#[test]
fn decode_field_reads_records() {
    let data = json!({ "authors": [{
        "id": "1",
        "firstName": "Ursula",
        "lastName": "Le Guin",
        "birthDate": "1929-10-21",
        "biography": null,
        "nationality": "American",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    }]});
    let authors: Vec<Author> = decode_field(&data, "authors").unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].full_name(), "Ursula Le Guin");
    assert_eq!(authors[0].biography, None);
}

#[test]
fn decode_field_type_mismatch_names_field() {
    let data = json!({ "ping": "yes" });
    let err = decode_field::<bool>(&data, "ping").unwrap_err();
    assert!(matches!(&err, NetError::Parse(msg) if msg.starts_with("ping:")));
}

// =============================================================================
// request envelope
// =============================================================================

#[test]
fn request_serializes_operation_name_and_variables() {
    let variables = json!({ "email": "a@example.com", "password": "pw" });
    let request = GraphqlRequest::new(&LOGIN, &variables);
    let encoded = serde_json::to_value(&request).unwrap();
    assert_eq!(encoded["operationName"], "Login");
    assert_eq!(encoded["variables"]["email"], "a@example.com");
    assert!(encoded["query"].as_str().unwrap().starts_with("mutation Login("));
}

#[test]
fn documents_span_lines_without_gluing_tokens() {
    assert!(BOOKS.document.contains("publisherId createdAt"));
    assert!(LOGIN.document.contains("$password) { id email name role }"));
}

#[test]
fn operation_kinds() {
    assert_eq!(ME.kind, OperationKind::Query);
    assert_eq!(LOGOUT.kind, OperationKind::Mutation);
    assert_eq!(UPDATE_BOOK.field, "updateBook");
}
