// ABOUTME: Trigger rejection and failure responses.
// ABOUTME: Maps decode, validation, and pipeline errors to HTTP status codes.

use crate::deploy::DeployError;
use crate::types::ParseImageRefError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid image: {0}")]
    InvalidImage(#[from] ParseImageRefError),

    #[error("deployment failed: {0}")]
    Deploy(#[from] DeployError),
}

impl IntoResponse for TriggerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            TriggerError::InvalidJson(_) | TriggerError::InvalidImage(_) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": message }),
            ),
            TriggerError::Deploy(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": message, "stage": err.stage().as_str() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
