use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::ConversionError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

pub fn status_for(error: &ConversionError) -> StatusCode {
    match error {
        ConversionError::Validation(_)
        | ConversionError::Conversion(_)
        | ConversionError::Configuration(_) => StatusCode::BAD_REQUEST,
        ConversionError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
        ConversionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ConversionError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if self.is_client_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        } else {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

pub fn json_rejection(rejection: JsonRejection) -> ConversionError {
    ConversionError::Validation(format!("Invalid JSON body: {}", rejection.body_text()))
}

pub fn query_rejection(rejection: QueryRejection) -> ConversionError {
    ConversionError::Validation(format!("Invalid query: {}", rejection.body_text()))
}

pub fn multipart_rejection(rejection: MultipartRejection) -> ConversionError {
    ConversionError::Validation(format!("Invalid multipart body: {}", rejection.body_text()))
}

pub fn multipart_error(error: MultipartError) -> ConversionError {
    ConversionError::Validation(format!("Failed to read multipart: {}", error.body_text()))
}
