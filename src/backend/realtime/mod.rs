//! Real-time Update Module
//!
//! Live delivery of chat messages to connected clients.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - Per-connection Subscriber worker and FrameSink
//! └── subscription.rs - GET /stream SSE handler
//! ```
//!
//! Every subscriber runs in its own task with its own cursor, so a slow or
//! vanished client only ever affects itself.

/// Broadcast coordination (subscriber workers)
pub mod broadcast;

/// SSE subscription handler
pub mod subscription;

pub use broadcast::{Frame, FrameSink, StartPosition, Subscriber, TransportError, STREAM_BUFFER};
pub use subscription::handle_stream;
