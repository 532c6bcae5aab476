use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable identifiers for dashboard clients. Messages may change, codes don't.

/// Stable error code constants.
///
/// Rendered as `{"code": "NOT_FOUND", "message": "..."}`.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

// ── ServiceError ────────────────────────────────────────────────────

/// Error type shared by every module's HTTP surface.
///
/// The calculation engines never produce one of these; only the storage
/// and request layers around them do.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Role or resource does not exist. HTTP 404.
    #[error("{0}")]
    NotFound(String),

    /// Request body is malformed or names something impossible. HTTP 400.
    #[error("{0}")]
    Validation(String),

    /// KV backend failure. HTTP 500.
    #[error("{0}")]
    Storage(String),

    /// Anything else. HTTP 500.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => error_code::NOT_FOUND,
            ServiceError::Validation(_) => error_code::VALIDATION_FAILED,
            ServiceError::Storage(_) => error_code::STORAGE_ERROR,
            ServiceError::Internal(_) => error_code::INTERNAL,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Storage(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_code_mapping() {
        let cases = [
            (
                ServiceError::NotFound("role 'qc' has no page access".into()),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                ServiceError::Validation("role name is empty".into()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
            ),
            (
                ServiceError::Storage("redb commit failed".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
            ),
            (
                ServiceError::Internal("bad json".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_code(), status);
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn response_carries_status() {
        let resp = ServiceError::NotFound("role 'qc'".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn display_is_bare_message() {
        let err = ServiceError::Validation("role name is empty".into());
        assert_eq!(err.to_string(), "role name is empty");
    }
}
