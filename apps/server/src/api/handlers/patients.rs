//! Patient handlers

use crate::{
    api::extractors::{ApiJson, ApiQuery},
    services::PatientFilter,
    state::AppState,
    Result,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sonovet_models::PatientInput;

use super::deleted;

pub async fn create_patient(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<PatientInput>,
) -> Result<Response> {
    let patient = state.patients.create(input).await?;
    Ok((StatusCode::OK, Json(patient)).into_response())
}

pub async fn list_patients(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<PatientFilter>,
) -> Result<Response> {
    let patients = state.patients.list(&filter).await?;
    Ok((StatusCode::OK, Json(patients)).into_response())
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let patient = state.patients.get(&id).await?;
    Ok((StatusCode::OK, Json(patient)).into_response())
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<PatientInput>,
) -> Result<Response> {
    let patient = state.patients.update(&id, input).await?;
    Ok((StatusCode::OK, Json(patient)).into_response())
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    state.patients.delete(&id).await?;
    Ok(deleted("Patient"))
}
