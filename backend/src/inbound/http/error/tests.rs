//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn store_failure(expected_trace_id: String) -> Error {
    Error::internal("UNIQUE constraint failed: evaluations.semaine")
        .with_trace_id(expected_trace_id)
}

#[fixture]
fn invalid_request_case(expected_trace_id: String) -> Error {
    Error::invalid_request("bad")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"field": "week"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> serde_json::Value {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id not valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn store_failures_keep_raw_message(
    #[from(store_failure)] error: Error,
    expected_trace_id: String,
) {
    let body = assert_error_response(
        error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(
        body,
        json!({
            "error": "UNIQUE constraint failed: evaluations.semaine",
            "code": "internal_error",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn invalid_request_includes_details(
    #[from(invalid_request_case)] error: Error,
    expected_trace_id: String,
) {
    let body =
        assert_error_response(error, StatusCode::BAD_REQUEST, Some(expected_trace_id.as_str()))
            .await;

    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["error"], "bad");
    assert_eq!(body["details"], json!({"field": "week"}));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let body = assert_error_response(Error::not_found("missing"), StatusCode::NOT_FOUND, None).await;

    assert!(body.get("traceId").is_none());
}

#[rstest]
fn actix_errors_are_redacted() {
    let actix_error = actix_web::error::ErrorBadGateway("upstream details");
    let error = Error::from(actix_error);

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Internal server error");
}

#[derive(Debug, Deserialize)]
struct Probe {
    #[expect(dead_code, reason = "field only drives deserialisation")]
    week: String,
}

async fn probe(_body: web::Json<Probe>, _id: web::Path<i64>) -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[rstest]
#[case("/probe/1", r#"{"semaine": "2024-W10"}"#, "invalid_body")]
#[case("/probe/1", "not json", "invalid_body")]
#[case("/probe/abc", r#"{"week": "2024-W10"}"#, "invalid_path")]
#[actix_web::test]
async fn extractor_failures_become_bad_requests(
    #[case] uri: &str,
    #[case] body: &'static str,
    #[case] detail_code: &str,
) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .route("/probe/{id}", web::post().to(probe)),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri(uri)
        .insert_header(("content-type", "application/json"))
        .set_payload(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: serde_json::Value = actix_test::read_body_json(response).await;
    assert_eq!(payload["code"], "invalid_request");
    assert_eq!(payload["details"]["code"], detail_code);
}
