/**
 * Call Route Handlers
 *
 * # Routes
 *
 * - `POST /start-call` - Announce a call
 * - `POST /end-call` - End a call and announce its duration
 * - `GET /call-status` - Active calls keyed by id
 */

use axum::{
    routing::{get, post},
    Router,
};
use crate::backend::calls::handlers::{handle_call_status, handle_end_call, handle_start_call};
use crate::backend::server::state::AppState;

/// Configure call signalling routes
pub fn configure_call_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/start-call", post(handle_start_call))
        .route("/end-call", post(handle_end_call))
        .route("/call-status", get(handle_call_status))
}
