//! API layer - routes, handlers, and middleware

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;
use tower::ServiceBuilder;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.config.server.max_request_body_size;
    let cors_origins = state.config.server.cors_origins.clone();

    // Outermost first: body limit, then CORS, compression, metrics, request
    // span and finally security headers closest to the handlers.
    let layers = ServiceBuilder::new()
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(middleware::cors(&cors_origins))
        .layer(middleware::compression())
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
        // 204 keeps browser favicon requests out of the 404 logs
        .route("/favicon.ico", get(favicon))
        .merge(routes::metrics_routes())
        .nest("/api", routes::api::api_routes())
        .with_state(state)
        .layer(layers)
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "sonovet"
    }))
}

async fn root(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "server": "Sonovet",
            "version": env!("CARGO_PKG_VERSION"),
            "store": state.store.backend(),
            "status": "running"
        })),
    )
}

async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
