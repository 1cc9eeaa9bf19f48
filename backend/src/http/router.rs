//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing).

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Upper bound for `POST /v1/blocks` payloads.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Public read-only API consumed by third-party apps
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/dates", get(handlers::list_dates))
        .route("/schedule/{queue}", get(handlers::get_today_schedule))
        .route("/schedule/{queue}/{day}", get(handlers::get_schedule))
        .route("/all/{day}", get(handlers::get_all_schedules))
        .route("/blocks", post(handlers::ingest_blocks));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/status", get(handlers::status))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
