use anyhow::Context as _;
use axum::http::StatusCode;
use serde_json::Value;

pub fn assert_status(actual: StatusCode, expected: StatusCode, what: &str) {
    assert_eq!(actual, expected, "{what}: expected {expected}, got {actual}");
}

/// `{"detail": ...}` error body
pub fn assert_detail(body: &Value, expected: &str) {
    assert_eq!(
        body.get("detail").and_then(|v| v.as_str()),
        Some(expected),
        "unexpected error body: {body}"
    );
}

pub fn as_array(value: &Value) -> anyhow::Result<&Vec<Value>> {
    value.as_array().context("response is a JSON array")
}

pub fn ids(value: &Value) -> anyhow::Result<Vec<String>> {
    Ok(as_array(value)?
        .iter()
        .filter_map(|v| v["id"].as_str().map(str::to_string))
        .collect())
}
