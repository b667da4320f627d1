/**
 * Message Data Structure
 *
 * This module defines the chat entry stored in the message log and pushed
 * to every live subscriber.
 *
 * The wire shape is camelCase JSON:
 * `{author, content, timestampMillis, kind, callId?, sequence}`.
 */
use serde::{Deserialize, Serialize};

/// Author used when a client leaves the name blank
pub const ANONYMOUS_AUTHOR: &str = "Anon";

/// Author attached to server-generated announcements
pub const SYSTEM_AUTHOR: &str = "system";

/// Default limit on author names, in characters
pub const DEFAULT_MAX_AUTHOR_LEN: usize = 30;

/// Kind of chat entry
///
/// Upload kinds (`Image`, `Video`, `Audio`, `File`) are picked from the
/// uploaded filename's extension, see `backend::uploads::classify`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Emoji,
    Sticker,
    Image,
    Video,
    Audio,
    File,
    System,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Emoji => "emoji",
            Self::Sticker => "sticker",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::File => "file",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a single chat entry
///
/// Messages are built by request handlers with `sequence` and
/// `timestamp_millis` left at zero. `MessageLog::append` stamps both, so a
/// message observed through `snapshot()` or a subscription always carries
/// its final values.
///
/// # Fields
/// * `author` - Normalized author name
/// * `content` - Message text, emoji, sticker text or an upload reference
/// * `timestamp_millis` - Epoch milliseconds assigned at append time
/// * `kind` - What the content is
/// * `call_id` - Set only on call-lifecycle system messages
/// * `sequence` - Log position, strictly increasing and never reused
///
/// # Example
/// ```rust
/// use huddle::shared::{Message, MessageKind};
///
/// let message = Message::text("Alice", "Hello, world!");
/// assert_eq!(message.kind, MessageKind::Text);
/// assert_eq!(message.sequence, 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub author: String,
    pub content: String,
    pub timestamp_millis: i64,
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    #[serde(default)]
    pub sequence: u64,
}

impl Message {
    /// Create an unstamped message of the given kind
    pub fn new(author: impl Into<String>, content: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
            timestamp_millis: 0,
            kind,
            call_id: None,
            sequence: 0,
        }
    }

    pub fn text(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(author, content, MessageKind::Text)
    }

    /// Create a server announcement, optionally tied to a call
    pub fn system(content: impl Into<String>, call_id: Option<String>) -> Self {
        Self {
            call_id,
            ..Self::new(SYSTEM_AUTHOR, content, MessageKind::System)
        }
    }
}

/// Normalize a client-supplied author name
///
/// The name is cut to `max_len` characters first and trimmed afterwards,
/// so a long name padded with spaces never ends in whitespace. Missing or
/// blank names become [`ANONYMOUS_AUTHOR`].
pub fn normalize_author(raw: Option<&str>, max_len: usize) -> String {
    let truncated: String = raw.unwrap_or_default().chars().take(max_len).collect();
    let trimmed = truncated.trim();
    if trimmed.is_empty() {
        ANONYMOUS_AUTHOR.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Current wall-clock time in epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
