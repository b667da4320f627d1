/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Chat routes (history, stream, send, upload)
 * 2. Call routes (start, end, status)
 * 3. Health check
 * 4. Stored uploads under `/uploads`
 * 5. Fallback handler (JSON 404)
 *
 * # Layers
 *
 * - `TraceLayer` - one span per request
 * - `GlobalConcurrencyLimitLayer` - one semaphore shared by every route, so
 *   the configured limit caps in-flight requests server-wide. An SSE
 *   response releases its permit once its headers are sent; open streams
 *   are not counted.
 */

use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use crate::backend::error::BackendError;
use crate::backend::routes::call_routes::configure_call_routes;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;
use crate::backend::uploads::storage::UPLOAD_URL_PREFIX;

/// Handle `GET /health`
pub async fn handle_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_not_found() -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, "Not found")
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the log, call registry,
///   upload store and configuration
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let config = app_state.config.clone();

    let router = configure_chat_routes(Router::new(), config.max_upload_bytes);
    let router = configure_call_routes(router);

    let router = router
        .route("/health", get(handle_health))
        .nest_service(UPLOAD_URL_PREFIX, ServeDir::new(&config.upload_dir))
        .fallback(handle_not_found);

    router
        .layer(GlobalConcurrencyLimitLayer::new(config.max_connections))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
