//! Prometheus metrics for the sonovet server

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge_vec, HistogramVec,
    IntCounterVec, IntGaugeVec,
};

const API_PREFIX: &str = "/api";

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "sonovet_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "sonovet_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "sonovet_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    pub static ref HTTP_REQUEST_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "sonovet_http_request_size_bytes",
        "HTTP request body size in bytes",
        &["method", "path"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0, 10_000_000.0, 50_000_000.0]
    )
    .expect("Failed to register HTTP_REQUEST_SIZE_BYTES");

    pub static ref HTTP_RESPONSE_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "sonovet_http_response_size_bytes",
        "HTTP response size in bytes",
        &["method", "path", "status"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0, 10_000_000.0]
    )
    .expect("Failed to register HTTP_RESPONSE_SIZE_BYTES");

    // Entity Operation Metrics

    /// API operations by entity and operation
    pub static ref ENTITY_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "sonovet_entity_operations_total",
        "Total number of entity operations",
        &["entity", "operation", "status"]
    )
    .expect("Failed to register ENTITY_OPERATIONS_TOTAL");

    pub static ref ENTITY_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "sonovet_entity_operation_duration_seconds",
        "Entity operation duration in seconds",
        &["entity", "operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register ENTITY_OPERATION_DURATION_SECONDS");

    // Report and Image Metrics

    /// Report exports by outcome
    pub static ref REPORT_EXPORTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "sonovet_report_exports_total",
        "Total number of exam report exports",
        &["status"]
    )
    .expect("Failed to register REPORT_EXPORTS_TOTAL");

    pub static ref REPORT_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "sonovet_report_size_bytes",
        "Size of rendered report documents in bytes",
        &["format"],
        vec![1_000.0, 5_000.0, 10_000.0, 50_000.0, 100_000.0, 500_000.0, 1_000_000.0]
    )
    .expect("Failed to register REPORT_SIZE_BYTES");

    pub static ref IMAGE_UPLOAD_BYTES: HistogramVec = register_histogram_vec!(
        "sonovet_image_upload_bytes",
        "Size of uploaded exam images in bytes",
        &["extension"],
        vec![10_000.0, 100_000.0, 500_000.0, 1_000_000.0, 5_000_000.0, 10_000_000.0, 25_000_000.0]
    )
    .expect("Failed to register IMAGE_UPLOAD_BYTES");

    // Store Metrics

    /// Document store operation duration
    pub static ref STORE_OPERATION_DURATION: HistogramVec = register_histogram_vec!(
        "sonovet_store_operation_duration_seconds",
        "Document store operation duration in seconds",
        &["operation"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    )
    .expect("Failed to register STORE_OPERATION_DURATION");

    /// Stored documents per collection
    pub static ref DOCUMENTS_TOTAL: IntGaugeVec = register_int_gauge_vec!(
        "sonovet_documents_total",
        "Number of stored documents by collection",
        &["collection"]
    )
    .expect("Failed to register DOCUMENTS_TOTAL");
}

/// Path segments below `/api`, or `None` for non-API paths.
fn api_segments(path: &str) -> Option<Vec<&str>> {
    let rest = path.strip_prefix(API_PREFIX)?;
    if !rest.is_empty() && !rest.starts_with('/') {
        return None;
    }
    Some(rest.split('/').filter(|s| !s.is_empty()).collect())
}

/// Fixed path segments that are not identifiers.
fn is_literal(segment: &str) -> bool {
    matches!(segment, "classify")
}

/// Helper to sanitize path for metrics labels (replace ids, limit cardinality)
pub fn sanitize_path(path: &str) -> String {
    let Some(segments) = api_segments(path) else {
        return path.to_string();
    };

    let mut out = String::from(API_PREFIX);
    for (i, segment) in segments.iter().take(4).enumerate() {
        out.push('/');
        match i {
            1 if !is_literal(segment) => out.push_str("{id}"),
            3 => out.push_str("{sub_id}"),
            _ => out.push_str(segment),
        }
    }
    out
}

/// Entity collection addressed by an API path (`patients`, `exams`, ...)
pub fn extract_entity(path: &str) -> Option<String> {
    let segments = api_segments(path)?;
    segments.first().map(|s| s.to_string())
}

/// Operation name from method and path
pub fn extract_operation(method: &str, path: &str) -> Option<String> {
    let segments = api_segments(path)?;
    let first = *segments.first()?;

    let op = match (method, segments.len()) {
        ("POST", 1) if first == "initialize-defaults" => "seed",
        ("POST", 1) if first == "backup" => "restore",
        ("GET", 1) if first == "backup" => "backup",
        ("GET", 1) | ("HEAD", 1) => "list",
        ("POST", 1) => "create",
        ("POST", 2) if segments[1] == "classify" => "classify",
        ("GET", 2) => "read",
        ("PUT", _) => "update",
        ("GET", 3) if segments[2] == "export" => "export",
        ("POST", 3) if segments[2] == "images" => "attach_image",
        ("DELETE", 4) if segments[2] == "images" => "detach_image",
        ("DELETE", _) => "delete",
        _ => "custom",
    };
    Some(op.to_string())
}
