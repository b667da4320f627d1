//! Shared Module
//!
//! Types used by both the core chat components and the HTTP layer: the chat
//! entry itself, the shared error type and server configuration. Nothing in
//! here depends on axum, so the core can be exercised without the `ssr`
//! feature.

/// Message data structure
pub mod message;

/// Shared error types
pub mod error;

/// Server configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use message::{Message, MessageKind};
pub use error::SharedError;
pub use config::{ServerConfig, ServerConfigBuilder, ConfigError};
