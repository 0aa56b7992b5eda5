//! Unified error handling
//!
//! Provides the application error type and the uniform response envelope:
//! - [`AppError`] — application error enum
//! - [`ApiResponse`] — API response structure
//!
//! Every response body has the shape:
//!
//! ```json
//! { "status": "success", "data": { ... } }
//! { "status": "fail", "message": "..." }
//! ```
//!
//! # Usage
//!
//! ```ignore
//! // Return an error
//! Err(AppError::not_found("Bill abc"))
//!
//! // Return a success response
//! Ok(ok(data))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Uniform API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// "success" or "fail"
    pub status: &'static str,
    /// Result count for list endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (fail responses only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Application error enum
///
/// | Category | Variants | HTTP status |
/// |----------|----------|-------------|
/// | Authentication | Unauthorized, TokenExpired, InvalidToken | 401 |
/// | Authorization | Forbidden | 403 |
/// | Business | NotFound | 404 |
/// | Business | Validation, InsufficientStock | 400 |
/// | Store | Database | 400 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // ========== Authorization errors (403) ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Insufficient stock for product {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: i64,
        available: i64,
    },

    // ========== Store errors ==========
    // Surfaced to clients as a request failure, matching the
    // catch-and-respond behavior every handler follows.
    #[error("Database error: {0}")]
    Database(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Please login to access this resource".to_string(),
            ),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired".to_string()),
            AppError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),

            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                format!("You do not have permission to perform this action: {msg}"),
            ),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, format!("{msg} not found")),

            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            AppError::InsufficientStock { .. } => (StatusCode::BAD_REQUEST, self.to_string()),

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::BAD_REQUEST, "Database error".to_string())
            }
        };

        let body = Json(ApiResponse::<()> {
            status: "fail",
            results: None,
            data: None,
            message: Some(message),
        });

        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn token_expired() -> Self {
        Self::TokenExpired
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        status: "success",
        results: None,
        data: Some(data),
        message: None,
    })
}

/// Create a successful response with a result count (list endpoints)
pub fn ok_with_results<T: Serialize>(data: T, results: usize) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        status: "success",
        results: Some(results),
        data: Some(data),
        message: None,
    })
}

/// Create a 201 Created response
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, ok(data))
}

/// Create a 204 No Content response
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message_carries_details() {
        let err = AppError::InsufficientStock {
            product: "product:abc".to_string(),
            requested: 5,
            available: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("product:abc"));
        assert!(msg.contains("requested 5"));
        assert!(msg.contains("available 2"));
    }

    #[test]
    fn test_fail_envelope_skips_data() {
        let body = ApiResponse::<()> {
            status: "fail",
            results: None,
            data: None,
            message: Some("boom".to_string()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "fail");
        assert_eq!(json["message"], "boom");
        assert!(json.get("data").is_none());
        assert!(json.get("results").is_none());
    }
}
