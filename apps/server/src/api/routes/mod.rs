//! Route tables

pub mod api;

use crate::api::handlers::metrics::metrics_handler;
use crate::state::AppState;
use axum::{routing::get, Router};

/// Prometheus scrape endpoint, mounted at the root.
pub fn metrics_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics_handler))
}
