//! Metrics middleware - tracks HTTP request metrics

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{
    ENTITY_OPERATIONS_TOTAL, ENTITY_OPERATION_DURATION_SECONDS, HTTP_REQUESTS_IN_FLIGHT,
    HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS, HTTP_REQUEST_SIZE_BYTES,
    HTTP_RESPONSE_SIZE_BYTES,
};

fn content_length(headers: &axum::http::HeaderMap) -> Option<f64> {
    headers
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<f64>().ok())
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    // ids are folded out of the label to keep cardinality bounded
    let route = crate::metrics::sanitize_path(&path);

    HTTP_REQUESTS_IN_FLIGHT
        .with_label_values(&[&method, &route])
        .inc();

    if let Some(size) = content_length(req.headers()) {
        HTTP_REQUEST_SIZE_BYTES
            .with_label_values(&[&method, &route])
            .observe(size);
    }

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &route, &status])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &route])
        .observe(duration);

    if let Some(size) = content_length(response.headers()) {
        HTTP_RESPONSE_SIZE_BYTES
            .with_label_values(&[&method, &route, &status])
            .observe(size);
    }

    if let (Some(entity), Some(operation)) = (
        crate::metrics::extract_entity(&path),
        crate::metrics::extract_operation(&method, &path),
    ) {
        let outcome = if response.status().is_success() {
            "success"
        } else if response.status().is_client_error() {
            "client_error"
        } else {
            "server_error"
        };

        ENTITY_OPERATIONS_TOTAL
            .with_label_values(&[&entity, &operation, outcome])
            .inc();
        ENTITY_OPERATION_DURATION_SECONDS
            .with_label_values(&[&entity, &operation])
            .observe(duration);
    }

    HTTP_REQUESTS_IN_FLIGHT
        .with_label_values(&[&method, &route])
        .dec();

    response
}
