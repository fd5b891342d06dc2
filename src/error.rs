//! Error types for the station service
//!
//! Provides unified error handling using thiserror. The cache itself never
//! fails; these errors come from configuration, lookups, and request input.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Service Error Enum ==
/// Unified error type for the station service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Capacity setting that is not an integer
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),

    /// Any other malformed configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Requested station does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Lookup backend does not offer this query
    #[error("Unsupported lookup: {0}")]
    Unsupported(String),

    /// Lookup backend failed
    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed station data: {0}")]
    Json(#[from] serde_json::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unsupported(_) => StatusCode::NOT_IMPLEMENTED,
            ServiceError::Lookup(_) => StatusCode::BAD_GATEWAY,
            ServiceError::InvalidCapacity(_)
            | ServiceError::Config(_)
            | ServiceError::Io(_)
            | ServiceError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the station service.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ServiceError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("KXXX".into()), StatusCode::NOT_FOUND),
            (ServiceError::Unsupported("radius".into()), StatusCode::NOT_IMPLEMENTED),
            (ServiceError::Lookup("timeout".into()), StatusCode::BAD_GATEWAY),
            (ServiceError::Config("port".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
