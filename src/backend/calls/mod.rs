//! Call Signalling Module
//!
//! Tracks announced voice and video calls and posts their lifecycle into the
//! chat as system messages.
//!
//! - **`registry`** - `CallSessionRegistry`, consistent with the message log
//! - **`handlers`** - `/start-call`, `/end-call` and `/call-status`

/// In-memory call session registry
pub mod registry;

/// HTTP handlers for call signalling
pub mod handlers;

pub use registry::{CallKind, CallSession, CallSessionRegistry};
pub use handlers::{handle_call_status, handle_end_call, handle_start_call};
