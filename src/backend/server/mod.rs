//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading (.env + environment)
//! └── init.rs         - State creation and app assembly
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `config::load_config`
//! 2. **State Creation**: log, call registry, upload store
//! 3. **Welcome Announcement**: optional system message
//! 4. **Router Creation**: routes, upload serving, tracing and limits

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use state::AppState;
pub use init::{create_app, init_state};
