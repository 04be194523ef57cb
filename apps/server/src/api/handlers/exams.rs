//! Exam handlers

use crate::{
    api::extractors::{ApiJson, ApiQuery},
    services::ExamFilter,
    state::AppState,
    Result,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sonovet_models::{ExamInput, ExamUpdate};

use super::deleted;

pub async fn create_exam(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ExamInput>,
) -> Result<Response> {
    let exam = state.exams.create(input).await?;
    Ok((StatusCode::OK, Json(exam)).into_response())
}

/// `GET /api/exams?patient_id=` - newest first
pub async fn list_exams(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<ExamFilter>,
) -> Result<Response> {
    let exams = state.exams.list(&filter).await?;
    Ok((StatusCode::OK, Json(exams)).into_response())
}

pub async fn get_exam(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response> {
    let exam = state.exams.get(&id).await?;
    Ok((StatusCode::OK, Json(exam)).into_response())
}

pub async fn update_exam(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<ExamUpdate>,
) -> Result<Response> {
    let exam = state.exams.update(&id, update).await?;
    Ok((StatusCode::OK, Json(exam)).into_response())
}

pub async fn delete_exam(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    state.exams.delete(&id).await?;
    Ok(deleted("Exam"))
}
