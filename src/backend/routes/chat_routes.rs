/**
 * Chat Route Handlers
 *
 * This module wires the chat write and read endpoints.
 *
 * # Routes
 *
 * - `GET /history` - Retained messages as a JSON array
 * - `GET /stream` - Server-Sent Events stream of new messages
 * - `POST /send` - Form-encoded text message
 * - `POST /send-emoji` - JSON emoji message
 * - `POST /send-sticker` - JSON sticker message
 * - `POST /upload` - Multipart file upload
 */

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use crate::backend::chat::handlers::{handle_history, handle_send, handle_send_emoji, handle_send_sticker};
use crate::backend::realtime::subscription::handle_stream;
use crate::backend::server::state::AppState;
use crate::backend::uploads::handlers::handle_upload;

/// Configure chat-related routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `max_upload_bytes` - Body limit for `POST /upload`; other routes keep
///   axum's default limit
pub fn configure_chat_routes(router: Router<AppState>, max_upload_bytes: usize) -> Router<AppState> {
    router
        .route("/history", get(handle_history))
        .route("/stream", get(handle_stream))
        .route("/send", post(handle_send))
        .route("/send-emoji", post(handle_send_emoji))
        .route("/send-sticker", post(handle_send_sticker))
        .route(
            "/upload",
            post(handle_upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
