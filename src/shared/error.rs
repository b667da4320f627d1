//! Shared Error Types
//!
//! This module defines error types raised by the core chat components and
//! surfaced by the backend handlers.
//!
//! # Error Categories
//!
//! - `ValidationError` - A required request field is missing or empty
//! - `MalformedUpload` - A multipart request could not be decoded at all
//!
//! Individual malformed multipart parts are not errors: the parser skips
//! them and keeps going.
//!
//! # Usage
//!
//! ```rust
//! use huddle::shared::error::SharedError;
//!
//! let error = SharedError::validation("text", "Message text cannot be empty");
//! ```
use thiserror::Error;

/// Shared error types that can occur anywhere in the chat core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// The upload body or its content type cannot be decoded
    #[error("Malformed upload: {message}")]
    MalformedUpload {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new malformed upload error
    pub fn malformed_upload(message: impl Into<String>) -> Self {
        Self::MalformedUpload {
            message: message.into(),
        }
    }
}

/// Reject a missing or blank required field
///
/// Returns the trimmed value on success.
pub fn require_field<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, SharedError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SharedError::validation(field, format!("'{}' is required", field))),
    }
}
