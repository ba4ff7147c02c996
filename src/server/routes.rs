//! Route table for the web interface.

use axum::routing::get;
use axum::Router;

use super::handlers;
use super::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/files", get(handlers::api_files))
        .route("/api/content", get(handlers::api_content))
        .with_state(state)
}
