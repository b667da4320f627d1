/**
 * Call Signalling Handlers
 *
 * `POST /start-call`, `POST /end-call` and `GET /call-status`.
 *
 * Calls are announcements only: the server records who started which call
 * and posts system messages into the chat. Media never passes through here.
 *
 * # Example Request
 *
 * ```http
 * POST /start-call HTTP/1.1
 * Content-Type: application/json
 *
 * {"username":"Alice","callId":"c1","callType":"video"}
 * ```
 *
 * # Example Response
 *
 * ```json
 * {"callId":"c1","status":"started"}
 * ```
 */

use std::collections::HashMap;
use std::sync::Arc;
use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use crate::backend::calls::registry::{CallKind, CallSession, CallSessionRegistry};
use crate::backend::error::{json_body, BackendError};
use crate::backend::server::state::AppState;
use crate::shared::error::require_field;
use crate::shared::message::normalize_author;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCallRequest {
    pub username: Option<String>,
    pub call_id: Option<String>,
    pub call_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndCallRequest {
    pub username: Option<String>,
    pub call_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCallResponse {
    pub call_id: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndCallResponse {
    pub status: &'static str,
    /// `null` when the call was not active
    pub duration_secs: Option<u64>,
}

/// Handle `POST /start-call`
///
/// `callType` defaults to voice when absent or blank.
///
/// # Errors
///
/// * `400 Bad Request` - Body is not JSON, or `callType` is neither voice nor video
pub async fn handle_start_call(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<StartCallResponse>, BackendError> {
    let request: StartCallRequest = json_body(&body)?;
    let username = normalize_author(request.username.as_deref(), app_state.config.max_author_len);

    let kind = match request.call_type.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(call_type) => call_type.parse::<CallKind>()?,
        None => CallKind::default(),
    };

    let call_id = app_state.calls.start(request.call_id, &username, kind);

    Ok(Json(StartCallResponse {
        call_id,
        status: "started",
    }))
}

/// Handle `POST /end-call`
///
/// Ending a call that is not active still succeeds, with a null duration.
///
/// # Errors
///
/// * `400 Bad Request` - Body is not JSON, or `callId` is missing or blank
pub async fn handle_end_call(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<EndCallResponse>, BackendError> {
    let request: EndCallRequest = json_body(&body)?;
    let call_id = require_field("callId", request.call_id.as_deref())?;
    let username = normalize_author(request.username.as_deref(), app_state.config.max_author_len);

    let duration_secs = app_state.calls.end(call_id, &username);

    Ok(Json(EndCallResponse {
        status: "ended",
        duration_secs,
    }))
}

/// Handle `GET /call-status`
pub async fn handle_call_status(
    State(calls): State<Arc<CallSessionRegistry>>,
) -> Json<HashMap<String, CallSession>> {
    Json(calls.status())
}
