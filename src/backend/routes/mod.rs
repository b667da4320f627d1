//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, health check, layers
//! ├── chat_routes.rs  - History, stream, send and upload routes
//! └── call_routes.rs  - Call signalling routes
//! ```
//!
//! # Route Types
//!
//! ## Chat Routes
//!
//! - `GET /history` - Retained messages
//! - `GET /stream` - Live SSE stream
//! - `POST /send`, `/send-emoji`, `/send-sticker` - Post a message
//! - `POST /upload` - Post files
//!
//! ## Call Routes
//!
//! - `POST /start-call`, `POST /end-call`, `GET /call-status`
//!
//! ## Other
//!
//! - `GET /health` - Liveness and version
//! - `GET /uploads/{name}` - Stored upload payloads

/// Main router creation
pub mod router;

/// Chat routes
pub mod chat_routes;

/// Call signalling routes
pub mod call_routes;

pub use router::create_router;
