//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - A router-backed test app with an isolated upload directory
//! - A multipart body builder
//! - Custom assertion macros

#[macro_use]
pub mod assertions;
#[cfg(feature = "ssr")]
pub mod app;
pub mod multipart;

// Re-export commonly used utilities
#[cfg(feature = "ssr")]
pub use app::*;
pub use multipart::*;
