//! Reference value handlers

use crate::{
    api::extractors::{ApiJson, ApiQuery},
    services::ReferenceValueFilter,
    state::AppState,
    Result,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sonovet_models::{MeasurementQuery, ReferenceValueInput};

use super::deleted;

pub async fn create_reference_value(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ReferenceValueInput>,
) -> Result<Response> {
    let value = state.reference_values.create(input).await?;
    Ok((StatusCode::OK, Json(value)).into_response())
}

pub async fn list_reference_values(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<ReferenceValueFilter>,
) -> Result<Response> {
    let values = state.reference_values.list(&filter).await?;
    Ok((StatusCode::OK, Json(values)).into_response())
}

pub async fn get_reference_value(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let value = state.reference_values.get(&id).await?;
    Ok((StatusCode::OK, Json(value)).into_response())
}

pub async fn update_reference_value(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<ReferenceValueInput>,
) -> Result<Response> {
    let value = state.reference_values.update(&id, input).await?;
    Ok((StatusCode::OK, Json(value)).into_response())
}

pub async fn delete_reference_value(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    state.reference_values.delete(&id).await?;
    Ok(deleted("Reference value"))
}

/// `POST /api/reference-values/classify`
pub async fn classify_measurement(
    State(state): State<AppState>,
    ApiJson(query): ApiJson<MeasurementQuery>,
) -> Result<Response> {
    let classification = state.reference_values.classify(query).await?;
    Ok((StatusCode::OK, Json(classification)).into_response())
}
