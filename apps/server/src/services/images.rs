//! Exam image attachments
//!
//! Files live under `<upload_dir>/images/<image id><extension>`; the exam's
//! `images` array holds the metadata. Attach and detach edit that array with
//! single atomic push and pull operations, so concurrent uploads to the same
//! exam all keep their entries.

use crate::config::StorageConfig;
use crate::db::{Filter, Repository};
use crate::storage::FileStore;
use crate::{metrics, Error, Result};
use sonovet_models::{Exam, ExamImage};
use std::path::Path;

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

/// A stored image ready to be served.
#[derive(Debug, Clone)]
pub struct ImageContent {
    pub image: ExamImage,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Clone)]
pub struct ImageService {
    exams: Repository<Exam>,
    files: FileStore,
    max_bytes: usize,
    allowed_extensions: Vec<String>,
}

impl ImageService {
    pub fn new(exams: Repository<Exam>, files: FileStore, config: &StorageConfig) -> Self {
        Self {
            exams,
            files,
            max_bytes: config.max_image_bytes,
            allowed_extensions: config
                .allowed_image_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    pub async fn attach(
        &self,
        exam_id: &str,
        upload: ImageUpload,
        organ: Option<String>,
    ) -> Result<ExamImage> {
        self.exams.require(exam_id).await?;

        if upload.bytes.len() > self.max_bytes {
            return Err(Error::Validation(format!(
                "file exceeds the maximum image size of {} bytes",
                self.max_bytes
            )));
        }
        let extension = extension_of(upload.filename.as_deref());
        self.check_extension(extension.as_deref())?;

        let id = uuid::Uuid::new_v4().to_string();
        let filename = match &extension {
            Some(ext) => format!("{id}.{ext}"),
            None => id.clone(),
        };
        let path = self.files.image_path(&filename);
        self.files.write(&path, &upload.bytes).await?;

        let image = ExamImage {
            id,
            filename,
            organ: organ
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty()),
            path: path.to_string_lossy().into_owned(),
        };

        let pushed = self.exams.push_element(exam_id, "images", &image).await?;
        if pushed.is_none() {
            if let Err(e) = self.files.remove_if_exists(&path).await {
                tracing::warn!(image_id = %image.id, error = %e, "Failed to remove orphaned image file");
            }
            return Err(Error::not_found("Exam", exam_id));
        }

        metrics::IMAGE_UPLOAD_BYTES
            .with_label_values(&[extension.as_deref().unwrap_or("none")])
            .observe(upload.bytes.len() as f64);
        tracing::info!(
            exam_id = %exam_id,
            image_id = %image.id,
            organ = image.organ.as_deref().unwrap_or(""),
            bytes = upload.bytes.len(),
            "Image attached"
        );
        Ok(image)
    }

    /// Looks the image up across all exams and reads its file.
    pub async fn open(&self, image_id: &str) -> Result<ImageContent> {
        let filter = Filter::all().contains_element("images", serde_json::json!({ "id": image_id }));
        let exam = self
            .exams
            .find_one(&filter)
            .await?
            .ok_or_else(|| Error::not_found("Image", image_id))?;
        let image = exam
            .image(image_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Image", image_id))?;

        let path = self.files.image_path(&image.filename);
        let bytes = self
            .files
            .read(&path)
            .await?
            .ok_or_else(|| Error::not_found("Image file", image_id))?;

        let content_type = mime_guess::from_path(&image.filename)
            .first_or_octet_stream()
            .to_string();
        Ok(ImageContent {
            image,
            bytes,
            content_type,
        })
    }

    /// Removes the image file (if any) and the metadata entry.
    ///
    /// An unknown image id is not an error.
    pub async fn detach(&self, exam_id: &str, image_id: &str) -> Result<()> {
        let exam = self.exams.require(exam_id).await?;

        if let Some(image) = exam.image(image_id) {
            let path = self.files.image_path(&image.filename);
            match self.files.remove_if_exists(&path).await {
                Ok(removed) => {
                    tracing::debug!(image_id = %image_id, removed, "Image file removal");
                }
                Err(e) => {
                    tracing::warn!(image_id = %image_id, error = %e, "Failed to remove image file");
                }
            }
        }

        self.exams
            .pull_element(exam_id, "images", image_id)
            .await?
            .ok_or_else(|| Error::not_found("Exam", exam_id))?;
        tracing::info!(exam_id = %exam_id, image_id = %image_id, "Image detached");
        Ok(())
    }

    fn check_extension(&self, extension: Option<&str>) -> Result<()> {
        if self.allowed_extensions.is_empty() {
            return Ok(());
        }
        match extension {
            Some(ext) if self.allowed_extensions.iter().any(|a| a == ext) => Ok(()),
            Some(ext) => Err(Error::Validation(format!(
                "file type '.{ext}' is not allowed; accepted: {}",
                self.allowed_extensions.join(", ")
            ))),
            None => Err(Error::Validation(
                "file name has no extension; an image file is required".to_string(),
            )),
        }
    }
}

/// Lower-cased extension of the client's file name, without the dot.
fn extension_of(filename: Option<&str>) -> Option<String> {
    let name = Path::new(filename?).file_name()?.to_str()?;
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
