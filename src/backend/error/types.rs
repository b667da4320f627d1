/**
 * Backend Error Types
 *
 * This module defines the error returned by HTTP handlers. Every variant maps
 * to a status code, and `conversion.rs` turns it into a JSON response.
 *
 * # Error Categories
 *
 * ## Request errors (4xx)
 *
 * - Missing or empty required fields (`SharedError::ValidationError`)
 * - Upload bodies that cannot be decoded (`SharedError::MalformedUpload`)
 *
 * ## Server errors (5xx)
 *
 * - Payload persistence failures (`StorageError`)
 * - A configuration that fails validation at startup (`ConfigError`)
 *
 * Failures on a streaming connection never become a `BackendError`; they end
 * that subscriber's worker and nothing else.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::backend::uploads::storage::StorageError;
use crate::shared::{ConfigError, SharedError};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Handler error: {message}")]
    HandlerError {
        status: StatusCode,
        message: String,
    },

    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error(transparent)]
    StorageError(#[from] StorageError),

    #[error(transparent)]
    ConfigError(#[from] ConfigError),
}

impl BackendError {
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::MalformedUpload { .. } => StatusCode::BAD_REQUEST,
            },
            Self::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
