//! Error responses.

use crate::types::ErrorResponse;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use notes_core::ErrorKind;

/// A failed request: HTTP status, failure category and a readable message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_upload(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorKind::InvalidUpload, message)
    }

    pub fn too_large(max_bytes: usize) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::InvalidUpload,
            format!("The uploaded file exceeds the {} byte limit", max_bytes),
        )
    }

    pub fn timeout() -> Self {
        Self::new(
            StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::Timeout,
            "Processing the presentation took too long.",
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Internal,
            message,
        )
    }

    /// Multipart errors keep the status axum assigns (e.g. 413 over the limit).
    pub fn from_multipart(err: MultipartError) -> Self {
        let status = err.status();
        let kind = if status.is_server_error() {
            ErrorKind::Internal
        } else {
            ErrorKind::InvalidUpload
        };
        Self::new(status, kind, err.body_text())
    }
}

impl From<notes_core::Error> for ApiError {
    fn from(err: notes_core::Error) -> Self {
        let status = match err.kind() {
            ErrorKind::CorruptArchive | ErrorKind::EmptyPresentation => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.kind(), err.user_message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
            kind: self.kind,
        };
        (self.status, Json(body)).into_response()
    }
}
