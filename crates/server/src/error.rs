//! HTTP error type
//!
//! Every handler returns `Result<T, AppError>`. The `IntoResponse` impl
//! turns each variant into a status code and the JSON body
//! `{"error": "<code>", "message": "<text>"}`.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use homestretch_core::SiteError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

// ============================================================================
// AppError
// ============================================================================

#[derive(Debug, Error)]
pub enum AppError {
    /// 404
    #[error("{0}")]
    NotFound(String),

    /// 400: the body could not be decoded at all
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 422
    #[error("{0}")]
    Validation(String),

    /// 401
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 409
    #[error("{0}")]
    Conflict(String),

    /// 413
    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    /// 500; the message is logged, never sent
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code sent in the `error` field
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Validation(_) => "validation_error",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Conflict(_) => "conflict",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error": self.code(),
            "message": message,
        });

        (self.status(), Json(body)).into_response()
    }
}

/// Shape of every error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

// ============================================================================
// From implementations
// ============================================================================

impl From<SiteError> for AppError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::Validation(_)
            | SiteError::FieldValidation { .. }
            | SiteError::InvalidSectionData { .. }
            | SiteError::InvalidReorder(_) => AppError::Validation(err.to_string()),
            SiteError::SectionNotFound(_) | SiteError::HeroNotFound => {
                AppError::NotFound(err.to_string())
            }
            SiteError::VersionConflict { .. } => AppError::Conflict(err.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // well-formed JSON of the wrong shape
            JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(err.body_text())
        } else {
            AppError::BadRequest(err.body_text())
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

// ============================================================================
// Tests
// ============================================================================
