use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::get, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::ai;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;

/// Create the full router with application state
///
/// `request_timeout` bounds every request; a request still running when it
/// elapses is dropped, cancelling the in-flight provider call, and answered
/// with 408.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .nest("/api/ai", ai::create_ai_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
