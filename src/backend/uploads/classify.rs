//! Upload kind classification
//!
//! The chat kind of an uploaded file depends only on its filename
//! extension, compared case-insensitively.

use crate::shared::MessageKind;
use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a"];

/// Pick the message kind for an uploaded filename
///
/// Unknown or missing extensions map to `MessageKind::File`.
pub fn classify_filename(filename: &str) -> MessageKind {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => MessageKind::Image,
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext) => MessageKind::Video,
        Some(ext) if AUDIO_EXTENSIONS.contains(&ext) => MessageKind::Audio,
        _ => MessageKind::File,
    }
}
