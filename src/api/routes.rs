//! HTTP API route definitions.

use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

use super::handlers::{appointment_status, book_appointment, health, AppState};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Booking endpoints
        .route("/book_appointment", post(book_appointment))
        .route("/appointment_status", get(appointment_status))
        // Health endpoint
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the Prometheus scrape router. Merged into the API router once
/// the recorder is installed.
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || std::future::ready(handle.render())))
}
