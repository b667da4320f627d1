/**
 * Send Handlers
 *
 * Write path for text, emoji and sticker messages:
 *
 * - `POST /send` - form `username`, `text` → `204 No Content`
 * - `POST /send-emoji` - JSON `{username, emoji}` → `{"status":"sent"}`
 * - `POST /send-sticker` - JSON `{username, sticker}` → `{"status":"sent"}`
 *
 * # Message Validation
 *
 * - The content field must be present and not blank (it is trimmed)
 * - Content is limited to `MAX_TEXT_LEN` characters
 * - The author is cut to the configured length; blank becomes "Anon"
 *
 * Invalid requests are rejected with `400 Bad Request` before anything is
 * appended.
 */

use axum::{
    body::Bytes,
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use crate::backend::error::{json_body, BackendError};
use crate::backend::server::state::AppState;
use crate::shared::error::require_field;
use crate::shared::message::normalize_author;
use crate::shared::{Message, MessageKind, SharedError};

/// Longest accepted message content, in characters
pub const MAX_TEXT_LEN: usize = 10_000;

#[derive(Debug, Default, Deserialize)]
pub struct SendForm {
    pub username: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EmojiRequest {
    pub username: Option<String>,
    pub emoji: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StickerRequest {
    pub username: Option<String>,
    pub sticker: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SentResponse {
    pub status: &'static str,
}

impl SentResponse {
    fn sent() -> Json<Self> {
        Json(Self { status: "sent" })
    }
}

/// Check a content field and return it trimmed
pub fn validate_content(field: &str, value: Option<&str>) -> Result<String, SharedError> {
    let content = require_field(field, value)?;
    let len = content.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(SharedError::validation(
            field,
            format!("'{}' is {} characters, the limit is {}", field, len, MAX_TEXT_LEN),
        ));
    }
    Ok(content.to_string())
}

fn append(app_state: &AppState, username: Option<&str>, content: String, kind: MessageKind) -> u64 {
    let author = normalize_author(username, app_state.config.max_author_len);
    let sequence = app_state.log.append(Message::new(author.as_str(), content, kind));
    tracing::info!("[Server] {} message {} from {}", kind, sequence, author);
    sequence
}

/// Handle `POST /send`
///
/// # Errors
///
/// * `400 Bad Request` - Body is not a form, or `text` is missing, blank or too long
pub async fn handle_send(
    State(app_state): State<AppState>,
    form: Result<Form<SendForm>, FormRejection>,
) -> Result<StatusCode, BackendError> {
    let Form(form) = form.map_err(|e| BackendError::handler(StatusCode::BAD_REQUEST, e.body_text()))?;
    let text = validate_content("text", form.text.as_deref())?;

    append(&app_state, form.username.as_deref(), text, MessageKind::Text);
    Ok(StatusCode::NO_CONTENT)
}

/// Handle `POST /send-emoji`
pub async fn handle_send_emoji(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<SentResponse>, BackendError> {
    let request: EmojiRequest = json_body(&body)?;
    let emoji = validate_content("emoji", request.emoji.as_deref())?;

    append(&app_state, request.username.as_deref(), emoji, MessageKind::Emoji);
    Ok(SentResponse::sent())
}

/// Handle `POST /send-sticker`
pub async fn handle_send_sticker(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<SentResponse>, BackendError> {
    let request: StickerRequest = json_body(&body)?;
    let sticker = validate_content("sticker", request.sticker.as_deref())?;

    append(&app_state, request.username.as_deref(), sticker, MessageKind::Sticker);
    Ok(SentResponse::sent())
}
