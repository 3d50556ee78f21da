//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::account_service::ClientError;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body could not be read as a decimal amount.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Invalid amount")]
    InvalidAmount(String),

    /// The call to the account service failed (transport error, non-2xx
    /// status or undecodable body).
    ///
    /// Returns HTTP 500 Internal Server Error. Nothing is retried.
    #[error("Account service error: {0}")]
    AccountService(#[from] ClientError),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidAmount` → 400 Bad Request
/// - `AccountService` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidAmount(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_amount", msg.clone())
            }
            AppError::AccountService(ref e) => {
                tracing::error!("Account service call failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_amount_is_bad_request() {
        let response = AppError::InvalidAmount("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_downstream_status_is_internal_error() {
        let err = ClientError::Status {
            status: 503,
            body: "down".to_string(),
        };
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
