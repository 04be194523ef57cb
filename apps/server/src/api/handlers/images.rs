//! Exam image handlers

use crate::{
    api::extractors::ApiQuery,
    services::ImageUpload,
    state::AppState,
    Error, Result,
};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

const FILE_FIELD: &str = "file";
const ORGAN_FIELD: &str = "organ";

#[derive(Debug, Default, Deserialize)]
pub struct ImageQuery {
    pub organ: Option<String>,
}

/// `POST /api/exams/:id/images` - multipart field `file`, optional `organ`
/// as query parameter or form field (the query parameter wins).
pub async fn upload_image(
    State(state): State<AppState>,
    Path(exam_id): Path<String>,
    ApiQuery(query): ApiQuery<ImageQuery>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Response> {
    let mut multipart = multipart.map_err(|e| Error::BadRequest(e.body_text()))?;

    let mut upload: Option<ImageUpload> = None;
    let mut form_organ: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        match field.name().unwrap_or("") {
            FILE_FIELD => {
                let filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| Error::BadRequest(format!("Failed to read upload: {}", e)))?;
                upload = Some(ImageUpload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            ORGAN_FIELD => {
                form_organ = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| Error::BadRequest(format!("Invalid organ field: {}", e)))?,
                );
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| {
        Error::Validation(format!("multipart field '{FILE_FIELD}' is required"))
    })?;
    let organ = query.organ.or(form_organ);

    let image = state.images.attach(&exam_id, upload, organ).await?;
    Ok((StatusCode::OK, Json(image)).into_response())
}

/// `GET /api/images/:id` - raw file with a guessed content type
pub async fn get_image(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<Response> {
    let content = state.images.open(&image_id).await?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content.content_type),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        content.bytes,
    )
        .into_response())
}

pub async fn delete_image(
    State(state): State<AppState>,
    Path((exam_id, image_id)): Path<(String, String)>,
) -> Result<Response> {
    state.images.detach(&exam_id, &image_id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Image deleted successfully" })),
    )
        .into_response())
}
