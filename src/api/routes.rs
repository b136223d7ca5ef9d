//! HTTP API route definitions.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use super::docs::swagger_ui;
use super::handlers::{
    api_index, custom_greeting, health, hello, languages, not_found, prometheus, stats, AppState,
};
use super::middleware::{count_requests, cors_layer, panic_response, security_headers};

/// Endpoints listed in 404 responses for unmatched API paths.
pub const AVAILABLE_ENDPOINTS: &[&str] = &[
    "/api",
    "/api/hello",
    "/api/hello/custom",
    "/api/hello/languages",
    "/api/hello/stats",
    "/api/docs",
    "/health",
];

/// Create the API router.
///
/// Routing is strict: `/api/hello/` does not match `/api/hello`.
pub fn create_router(state: AppState) -> Router {
    with_layers(routes(), state)
}

fn routes() -> Router<AppState> {
    Router::new()
        // Health endpoint
        .route("/health", get(health).fallback(not_found))
        // Greeting endpoints
        .route("/api", get(api_index).fallback(not_found))
        .route("/api/hello", get(hello).fallback(not_found))
        .route("/api/hello/custom", post(custom_greeting).fallback(not_found))
        .route("/api/hello/languages", get(languages).fallback(not_found))
        .route("/api/hello/stats", get(stats).fallback(not_found))
        // Metrics endpoint
        .route("/metrics", get(prometheus))
        .merge(swagger_ui())
        .fallback(not_found)
}

/// Wrap routes in the shared middleware stack.
///
/// Layers, outermost first: tracing, request counting, CORS, security
/// headers, panic recovery, body limit. Counting sits outside CORS so
/// preflight requests answered by the CORS layer are counted too.
fn with_layers(routes: Router<AppState>, state: AppState) -> Router {
    let tracker = Arc::clone(&state.stats);
    let config = Arc::clone(&state.config);

    let mut router = routes
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(CatchPanicLayer::custom(panic_response(config.app_env)));

    for header in security_headers() {
        router = router.layer(header);
    }

    router
        .layer(cors_layer(&config))
        .layer(from_fn_with_state(tracker, count_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
