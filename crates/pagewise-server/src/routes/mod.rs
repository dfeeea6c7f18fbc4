//! HTTP route handlers — matches the API surface the extension calls.

pub mod chat;
pub mod health;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
///
/// Chat routes are served under `/api` (what the extension calls) and at the
/// root for plain `POST /chat` callers.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .merge(chat::routes())
        .nest("/api", chat::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
