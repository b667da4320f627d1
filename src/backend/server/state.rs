/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the single container handed to every handler.
 * It holds:
 * - The message log (bounded chat history + wake-up channel)
 * - The call session registry (announces into the same log)
 * - The upload store (where payloads are written)
 * - The server configuration
 *
 * Each is created once at startup and shared through `Arc`. Nothing is
 * global, so tests can build as many independent instances as they need.
 *
 * # Example
 *
 * ```rust
 * use huddle::backend::server::state::AppState;
 * use huddle::shared::ServerConfig;
 *
 * let state = AppState::new(ServerConfig::default());
 * assert!(state.log.is_empty());
 * ```
 */

use axum::extract::FromRef;
use std::sync::Arc;
use crate::backend::calls::registry::CallSessionRegistry;
use crate::backend::chat::log::MessageLog;
use crate::backend::uploads::storage::UploadStore;
use crate::shared::ServerConfig;

/// Application state shared by every request handler
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Bounded chat history that every write path appends to and every
    /// stream reads from
    pub log: Arc<MessageLog>,

    /// In-progress calls; mutations announce into `log`
    pub calls: Arc<CallSessionRegistry>,

    /// Upload payload storage
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    /// Build fresh state from a configuration
    ///
    /// Does no I/O; `init::init_state` also prepares the upload directory.
    pub fn new(config: ServerConfig) -> Self {
        let log = Arc::new(MessageLog::new(config.max_messages));
        let calls = Arc::new(CallSessionRegistry::new(log.clone()));
        let uploads = Arc::new(UploadStore::new(config.upload_dir.clone()));
        Self {
            config: Arc::new(config),
            log,
            calls,
            uploads,
        }
    }
}

/// Allows handlers to extract `State<Arc<MessageLog>>` directly
impl FromRef<AppState> for Arc<MessageLog> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.log.clone()
    }
}

/// Allows handlers to extract `State<Arc<CallSessionRegistry>>` directly
impl FromRef<AppState> for Arc<CallSessionRegistry> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.calls.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
