//! Route definitions for the Reformat HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to handlers via Axum's `State` extractor.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

// Slack on top of the upload cap for multipart boundaries and headers;
// the handler enforces the exact per-file limit.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.conversion.max_upload_size_bytes as usize + BODY_LIMIT_SLACK;
    let cors = build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .route("/convert", post(handlers::convert::convert))
        .route("/formats", get(handlers::formats::list_formats))
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
