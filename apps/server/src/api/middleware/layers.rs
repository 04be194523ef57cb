//! Layer factories for middleware

use axum::http::HeaderValue;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
};

/// CORS for the configured origins. A `*` entry allows any origin; an empty
/// or entirely invalid list emits no CORS headers.
pub fn cors(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.iter().any(|o| o.trim() == "*") {
        return base.allow_origin(Any);
    }

    let header_values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok())
        .collect();

    if header_values.is_empty() {
        tracing::warn!("No valid CORS origins configured; cross-origin requests will be refused");
        return CorsLayer::new();
    }

    base.allow_origin(AllowOrigin::list(header_values))
}

/// Compression middleware
pub fn compression() -> CompressionLayer {
    CompressionLayer::new()
}
