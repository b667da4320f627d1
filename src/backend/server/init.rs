/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Validate the configuration
 * 2. Create the message log, call registry and upload store
 * 3. Make sure the upload directory exists
 * 4. Append the welcome announcement, if configured
 * 5. Create and configure the router
 *
 * Chat history is never restored: the log starts empty on every run.
 */

use axum::Router;
use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;
use crate::shared::{Message, ServerConfig};

/// Build application state and prepare everything it needs on disk
///
/// # Errors
///
/// Fails when the configuration is invalid (it may have been built as a
/// struct literal rather than through the builder) or when the upload
/// directory cannot be created.
pub async fn init_state(config: ServerConfig) -> Result<AppState, BackendError> {
    tracing::info!("Initializing chat backend");

    config.validate()?;
    let app_state = AppState::new(config);
    app_state.uploads.ensure_dir().await?;

    if let Some(welcome) = &app_state.config.welcome_message {
        app_state.log.append(Message::system(welcome.clone(), None));
    }

    tracing::info!(
        "Message log (capacity {}) and call registry initialized",
        app_state.log.capacity()
    );
    Ok(app_state)
}

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, BackendError> {
    let app_state = init_state(config).await?;
    let app = create_router(app_state);
    tracing::info!("Router configured");
    Ok(app)
}
