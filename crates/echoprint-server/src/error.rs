//! Error types for the Echoprint server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use echoprint_core::{DigestError, FingerprintError};
use serde::Serialize;

/// Application error type.
///
/// Every variant maps to a JSON body with a stable `error` field; the
/// service never answers a failure with HTML or an empty success.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The caller's request is malformed. Never worth retrying as-is.
    #[error("{0}")]
    Validation(String),

    /// The calendar service answered with a non-2xx status. Safe for the
    /// caller to retry later.
    #[error("calendar returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// An upstream could not be reached at all (connect failure or
    /// timeout). Treated the same as a non-2xx answer, never as success.
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The record store rejected an operation.
    #[error("record store returned {status}: {detail}")]
    Storage { status: u16, detail: String },

    /// A required endpoint or credential is missing. Fatal at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("Not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream { .. } | AppError::Unreachable(_) => StatusCode::BAD_GATEWAY,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Storage { status, detail } => {
                tracing::error!(status = *status, detail = %detail, "record store failure");
            }
            AppError::Configuration(msg) => {
                tracing::error!("configuration error: {}", msg);
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
            }
            AppError::Upstream { status, .. } => {
                tracing::warn!(status = *status, "calendar failure");
            }
            AppError::Unreachable(msg) => {
                tracing::warn!("upstream unreachable: {}", msg);
            }
            _ => {}
        }

        let body = ErrorBody {
            ok: false,
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<FingerprintError> for AppError {
    fn from(e: FingerprintError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<DigestError> for AppError {
    fn from(e: DigestError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Unreachable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Upstream {
                status: 503,
                body: String::new()
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Storage {
                status: 409,
                detail: String::new()
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_not_found_message_is_stable() {
        assert_eq!(AppError::NotFound.to_string(), "Not found");
    }

    #[test]
    fn test_validation_from_core_errors() {
        let e: AppError = FingerprintError::EmptyContent.into();
        assert!(matches!(e, AppError::Validation(_)));
        let e: AppError = DigestError::BadLength(7).into();
        assert!(matches!(e, AppError::Validation(_)));
    }
}
