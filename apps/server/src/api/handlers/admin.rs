//! Seeding and backup handlers

use crate::{
    api::extractors::ApiJson, request_context::RequestContext, services::Backup,
    state::AppState, Result,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// `POST /api/initialize-defaults`
pub async fn initialize_defaults(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Response> {
    let outcome = state.seed.initialize().await?;
    tracing::info!(
        request_id = %ctx.request_id,
        seeded = outcome.seeded,
        "Default data initialization requested"
    );
    Ok((StatusCode::OK, Json(outcome)).into_response())
}

/// `GET /api/backup`
pub async fn export_backup(State(state): State<AppState>) -> Result<Response> {
    let backup = state.backup.export().await?;
    Ok((StatusCode::OK, Json(backup)).into_response())
}

/// `POST /api/backup`
pub async fn restore_backup(
    State(state): State<AppState>,
    ctx: RequestContext,
    ApiJson(backup): ApiJson<Backup>,
) -> Result<Response> {
    let summary = state.backup.restore(backup).await?;
    tracing::info!(request_id = %ctx.request_id, "Backup restored");
    Ok((StatusCode::OK, Json(summary)).into_response())
}
