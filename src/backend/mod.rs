//! Backend Module
//!
//! This module contains all server-side code for Huddle: an Axum HTTP
//! server around an in-memory chat log with live fan-out.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`chat`** - `MessageLog` and the send/history handlers
//! - **`realtime`** - Per-connection subscribers and the `/stream` endpoint
//! - **`uploads`** - Multipart decoding, classification and payload storage
//! - **`calls`** - Call session registry and signalling handlers
//! - **`server`** - Application state, configuration loading, initialization
//! - **`routes`** - Route configuration and router assembly
//! - **`error`** - Backend error type and its HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs      - Module exports and documentation
//! ├── main.rs     - Server binary
//! ├── chat/       - Message log and chat handlers
//! ├── realtime/   - Live delivery
//! ├── uploads/    - File uploads
//! ├── calls/      - Call signalling
//! ├── server/     - State and initialization
//! ├── routes/     - Route configuration
//! └── error/      - Error types
//! ```
//!
//! # Data Flow
//!
//! Write path: handler validates input → (uploads only) decode and persist
//! payloads → `MessageLog::append`.
//!
//! Read path: `/stream` spawns a `Subscriber` that waits on the log and
//! pushes each new message to its client; `/history` returns a snapshot.
//!
//! # State Management
//!
//! `AppState` holds the log, the call registry, the upload store and the
//! configuration, each behind an `Arc`. They are created once in
//! `server::init` and handed to handlers through Axum state. There are no
//! globals, so tests build as many isolated instances as they like.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; errors become JSON
//! `{"error": ..., "status": ...}` responses. A failure on one stream only
//! ends that stream.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Message log and chat handlers
pub mod chat;

/// Real-time delivery
pub mod realtime;

/// File uploads
pub mod uploads;

/// Call signalling
pub mod calls;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use server::{create_app, AppState};
pub use chat::MessageLog;
pub use calls::CallSessionRegistry;
pub use realtime::{handle_stream, Subscriber};
pub use error::BackendError;
