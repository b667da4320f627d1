/**
 * Upload Handler
 *
 * `POST /upload` accepts `multipart/form-data` with a `username` field and
 * one or more file parts. Each file is persisted and becomes one chat
 * message whose content is the file's `/uploads/...` URL and whose kind
 * comes from the filename extension.
 *
 * # Username
 *
 * The first `username` field in the body is used for every file in the
 * request, wherever it appears relative to the file parts.
 *
 * # Partial Failure
 *
 * Malformed parts and files that cannot be stored are skipped; the rest of
 * the request still goes through. The response reports both counts:
 *
 * ```json
 * {"status":"uploaded","accepted":2,"skipped":1}
 * ```
 *
 * Only when every file fails to store does the request itself fail.
 */

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::Serialize;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::uploads::classify::classify_filename;
use crate::backend::uploads::multipart::{boundary_from_content_type, parse_multipart};
use crate::shared::message::normalize_author;
use crate::shared::{Message, SharedError};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub status: &'static str,
    pub accepted: usize,
    pub skipped: usize,
}

/// Handle `POST /upload`
///
/// # Errors
///
/// * `400 Bad Request` - Not multipart, no usable boundary, or no file parts
/// * `413 Payload Too Large` - Body over the configured upload limit
/// * `500 Internal Server Error` - None of the files could be stored
pub async fn handle_upload(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>, BackendError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| SharedError::malformed_upload("missing Content-Type header"))?;
    let boundary = boundary_from_content_type(content_type)?;

    let parsed = parse_multipart(&body, &boundary);
    let author = normalize_author(
        parsed.field_text("username").as_deref(),
        app_state.config.max_author_len,
    );

    let files: Vec<_> = parsed.files().collect();
    if files.is_empty() {
        return Err(SharedError::validation("file", "upload contains no file parts").into());
    }

    tracing::info!(
        author = %author,
        files = files.len(),
        malformed_parts = parsed.skipped,
        body_bytes = body.len(),
        "[Upload] Processing upload"
    );

    let mut accepted = 0;
    let mut skipped = parsed.skipped;
    let mut last_error = None;

    for file in files {
        let stored = match app_state.uploads.persist(&file.filename, &file.data).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!(filename = %file.filename, error = %e, "[Upload] Failed to store file");
                skipped += 1;
                last_error = Some(e);
                continue;
            }
        };

        let kind = classify_filename(&file.filename);
        let sequence = app_state.log.append(Message::new(author.as_str(), stored.url, kind));
        tracing::info!(
            filename = %file.filename,
            stored_name = %stored.stored_name,
            kind = %kind,
            sequence,
            "[Upload] File posted"
        );
        accepted += 1;
    }

    if accepted == 0 {
        if let Some(e) = last_error {
            return Err(e.into());
        }
    }

    Ok(Json(UploadResponse {
        status: "uploaded",
        accepted,
        skipped,
    }))
}
