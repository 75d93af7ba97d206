//! API error type with structured JSON responses.

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::care_flow::{
    CareFlowError, ValidationError, SIMPLIFICATION_FAILED_MESSAGE, STORE_FAILED_MESSAGE,
};

/// `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Simplification failed")]
    SimplificationFailed,
    #[error("Upload exceeds the size limit")]
    UploadTooLarge,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.code(), err.to_string()),
            ApiError::SimplificationFailed => (
                StatusCode::BAD_GATEWAY,
                "SIMPLIFICATION_FAILED",
                SIMPLIFICATION_FAILED_MESSAGE.to_string(),
            ),
            ApiError::UploadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "UPLOAD_TOO_LARGE",
                "The upload is too large. Please choose a smaller PDF.".to_string(),
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    STORE_FAILED_MESSAGE.to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<CareFlowError> for ApiError {
    fn from(err: CareFlowError) -> Self {
        match err {
            CareFlowError::Validation(e) => ApiError::Validation(e),
            // Already logged with its cause by the care flow.
            CareFlowError::Simplification(_) => ApiError::SimplificationFailed,
            CareFlowError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::UploadTooLarge
        } else {
            ApiError::BadRequest(format!("Malformed upload: {}", err.body_text()))
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::UploadTooLarge
        } else {
            ApiError::BadRequest(format!("Malformed request body: {}", err.body_text()))
        }
    }
}
