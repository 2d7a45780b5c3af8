//! HTTP API module for the booking, status, and health endpoints.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use handlers::AppState;
pub use routes::{create_router, metrics_router};
