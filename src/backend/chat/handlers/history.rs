use std::sync::Arc;
use axum::{extract::State, Json};
use crate::backend::chat::log::MessageLog;
use crate::shared::Message;

/// Handle `GET /history`
///
/// Returns every retained message, oldest first.
pub async fn handle_history(State(log): State<Arc<MessageLog>>) -> Json<Vec<Message>> {
    let messages = log.snapshot();
    tracing::debug!("[Server] Serving history with {} messages", messages.len());
    Json(messages)
}
