use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;

use markdown_gateway::application::services::ConversionError;
use markdown_gateway::presentation::handlers::status_for;

use crate::support::body_json;

#[test]
fn given_each_error_kind_when_mapping_then_returns_expected_status() {
    let cases = [
        (ConversionError::Validation("v".into()), StatusCode::BAD_REQUEST),
        (ConversionError::Conversion("c".into()), StatusCode::BAD_REQUEST),
        (ConversionError::Configuration("k".into()), StatusCode::BAD_REQUEST),
        (
            ConversionError::Timeout(Duration::from_secs(3)),
            StatusCode::REQUEST_TIMEOUT,
        ),
        (ConversionError::Internal("i".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, status) in cases {
        assert_eq!(status_for(&error), status, "{error}");
    }
}

#[tokio::test]
async fn given_timeout_error_when_rendering_then_body_carries_detail() {
    let response = ConversionError::Timeout(Duration::from_secs(3)).into_response();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "conversion timed out after 3 seconds");
}
