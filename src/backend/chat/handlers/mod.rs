//! Chat Handlers Module
//!
//! Axum handlers for the chat write and read paths.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── send.rs     - POST /send, /send-emoji, /send-sticker
//! └── history.rs  - GET /history
//! ```
//!
//! Uploads and call signalling also write to the log; their handlers live in
//! `backend::uploads` and `backend::calls`. The live stream is served by
//! `backend::realtime`.

/// Text, emoji and sticker handlers
pub mod send;

/// History snapshot handler
pub mod history;

pub use send::{handle_send, handle_send_emoji, handle_send_sticker, MAX_TEXT_LEN};
pub use history::handle_history;
