//! Chat Backend Module
//!
//! This module contains the shared chat history and the handlers that feed
//! and read it:
//! - `MessageLog`, the bounded in-memory log every write path appends to
//! - HTTP handlers for sending text, emoji and stickers and reading history
//!
//! History lives in memory only and starts empty on every run.
//!
//! # Example
//!
//! ```rust
//! use huddle::backend::chat::log::MessageLog;
//! use huddle::shared::Message;
//!
//! let log = MessageLog::new(500);
//! let sequence = log.append(Message::text("Alice", "Hello!"));
//! assert_eq!(sequence, 1);
//! ```

/// Bounded message log with broadcast wake-up
pub mod log;

/// Chat HTTP handlers
pub mod handlers;

pub use log::MessageLog;
pub use handlers::{handle_history, handle_send, handle_send_emoji, handle_send_sticker};
