//! Settings handlers

use crate::{api::extractors::ApiJson, state::AppState, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sonovet_models::Settings;

pub async fn get_settings(State(state): State<AppState>) -> Result<Response> {
    let settings = state.settings.get().await?;
    Ok((StatusCode::OK, Json(settings)).into_response())
}

pub async fn put_settings(
    State(state): State<AppState>,
    ApiJson(settings): ApiJson<Settings>,
) -> Result<Response> {
    let settings = state.settings.put(settings).await?;
    Ok((StatusCode::OK, Json(settings)).into_response())
}
