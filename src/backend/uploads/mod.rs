//! Uploads Module
//!
//! Turns `multipart/form-data` uploads into chat messages.
//!
//! # Module Structure
//!
//! ```text
//! uploads/
//! ├── mod.rs        - Module exports and documentation
//! ├── multipart.rs  - Body decoder (explicit state machine)
//! ├── classify.rs   - Filename extension → message kind
//! ├── storage.rs    - Payload persistence under the upload directory
//! └── handlers.rs   - POST /upload
//! ```
//!
//! Decoding and classification are pure; storage is the only part touching
//! the filesystem, and it always finishes before anything is appended to the
//! log.

/// Multipart body decoding
pub mod multipart;

/// Message kind from filename
pub mod classify;

/// Upload persistence
pub mod storage;

/// Upload HTTP handler
pub mod handlers;

pub use classify::classify_filename;
pub use handlers::handle_upload;
pub use multipart::{boundary_from_content_type, parse_multipart, ParsedBody, Part};
pub use storage::{StorageError, StoredFile, UploadStore};
