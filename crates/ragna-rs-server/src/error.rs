//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use ragna_rs_core::RagnaCoreError;
use serde_json::json;
use thiserror::Error;

/// Failure returned by a handler, rendered as `{"detail": ...}`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] RagnaCoreError);

impl ApiError {
    /// Status code and client-facing detail for this error.
    pub fn parts(&self) -> (StatusCode, String) {
        match &self.0 {
            RagnaCoreError::InvalidCredential(_) => {
                (StatusCode::UNAUTHORIZED, "Invalid API key".to_string())
            }
            RagnaCoreError::Validation(message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, message.clone())
            }
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.parts();
        if status.is_server_error() {
            error!("request failed (status={}): {}", status.as_u16(), self.0);
        } else {
            warn!("request rejected (status={}): {}", status.as_u16(), self.0);
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
