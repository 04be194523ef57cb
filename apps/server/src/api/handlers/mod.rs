//! Request handlers for API endpoints
//!
//! Handlers extract the request, call one service operation and shape the
//! response. Failures flow out as [`crate::Error`].

pub mod admin;
pub mod exams;
pub mod images;
pub mod metrics;
pub mod patients;
pub mod reference_values;
pub mod reports;
pub mod settings;
pub mod templates;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// `{"message": "<Entity> deleted successfully"}`
pub(crate) fn deleted(entity: &str) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "message": format!("{entity} deleted successfully") })),
    )
        .into_response()
}
