//! Huddle - Real-time Group Chat Backend
//!
//! Huddle is a live group chat server: clients post text, emoji, stickers,
//! media uploads and call signals, and every connected client sees them as
//! they happen over Server-Sent Events.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no HTTP dependency
//!   - `Message` and `MessageKind`
//!   - `SharedError`
//!   - `ServerConfig`
//!
//! - **`backend`** - Server-side code (only compiled with the `ssr` feature,
//!   enabled by default)
//!   - `chat::log` - the bounded message log every other part writes to
//!   - `realtime` - per-subscriber cursors and the `/stream` endpoint
//!   - `uploads` - multipart decoding, classification and payload storage
//!   - `calls` - in-progress call registry
//!   - `server`, `routes`, `error` - axum wiring
//!
//! # Usage
//!
//! ```rust,no_run
//! use huddle::backend::server::init::create_app;
//! use huddle::shared::ServerConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The message log and call registry are plain structs guarded by
//! `std::sync::Mutex`, shared through `Arc` in `AppState`. Lock sections never
//! span an `.await`. Stream workers park on a `tokio::sync::watch` channel,
//! not on the lock.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
