//! Report export handler

use crate::{state::AppState, Result};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use sonovet_report::PDF_MEDIA_TYPE;

/// `GET /api/exams/:id/export`
pub async fn export_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<String>,
) -> Result<Response> {
    let report = state.reports.export(&exam_id).await?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, PDF_MEDIA_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&report.download_name),
            ),
        ],
        report.bytes,
    )
        .into_response())
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name.
fn content_disposition(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii,
        urlencoding::encode(file_name)
    )
}
