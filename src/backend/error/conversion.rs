/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse`, so handlers can return
 * `Result<_, BackendError>` and use `?` on anything convertible into it.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 *
 * JSON request bodies are decoded with `json_body`, which turns a decode
 * failure into a 400 carrying the same envelope.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use crate::backend::error::types::BackendError;

/// Decode a JSON request body
///
/// # Errors
///
/// `400 Bad Request` when the bytes are not valid JSON for `T`.
pub fn json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, BackendError> {
    serde_json::from_slice(body).map_err(|e| {
        BackendError::handler(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e))
    })
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("[Server] Request failed: {}", message);
        } else {
            tracing::warn!("[Server] Request rejected: {}", message);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
