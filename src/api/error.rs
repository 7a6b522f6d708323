//! API error type and response formatting.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ManagementError;

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// A management failure on its way to the HTTP client.
#[derive(Debug)]
pub struct ApiError(pub ManagementError);

impl ApiError {
    /// Provider 4xx statuses pass through; everything else is a bad gateway.
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ManagementError::Provider(e) if e.is_client_error() => {
                StatusCode::from_u16(e.status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error kind for machine parsing
    pub error: String,
    /// Provider or identity error code
    pub code: Option<String>,
    /// Human-readable error message
    pub message: String,
    /// HTTP status returned by the provider
    pub status: Option<u16>,
}

impl From<ManagementError> for ApiError {
    fn from(err: ManagementError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, provider_status) = match &self.0 {
            ManagementError::Provider(e) => (Some(e.code.clone()), Some(e.status)),
            ManagementError::Auth(e) => (Some(e.code.clone()), e.status),
            _ => (None, None),
        };
        let body = ErrorResponse {
            error: self.0.kind().to_string(),
            code,
            message: self.0.to_string(),
            status: provider_status,
        };

        warn!(status = status.as_u16(), error = %self.0, "request failed");
        (status, Json(body)).into_response()
    }
}
