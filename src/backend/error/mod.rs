//! Backend Error Module
//!
//! Error types returned by HTTP handlers, and their conversion into HTTP
//! responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `HandlerError` - A handler-chosen status and message
//! - `SharedError` - Validation and malformed-upload errors from the core
//! - `StorageError` - Upload persistence failures
//! - `ConfigError` - Invalid configuration handed to `init_state`

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
pub use conversion::json_body;
