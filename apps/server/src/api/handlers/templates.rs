//! Template text handlers

use crate::{
    api::extractors::{ApiJson, ApiQuery},
    services::TemplateFilter,
    state::AppState,
    Result,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sonovet_models::TemplateInput;

use super::deleted;

pub async fn create_template(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<TemplateInput>,
) -> Result<Response> {
    let template = state.templates.create(input).await?;
    Ok((StatusCode::OK, Json(template)).into_response())
}

pub async fn list_templates(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<TemplateFilter>,
) -> Result<Response> {
    let templates = state.templates.list(&filter).await?;
    Ok((StatusCode::OK, Json(templates)).into_response())
}

pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let template = state.templates.get(&id).await?;
    Ok((StatusCode::OK, Json(template)).into_response())
}

pub async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<TemplateInput>,
) -> Result<Response> {
    let template = state.templates.update(&id, input).await?;
    Ok((StatusCode::OK, Json(template)).into_response())
}

pub async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    state.templates.delete(&id).await?;
    Ok(deleted("Template"))
}
