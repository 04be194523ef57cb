//! Exam sessions

use crate::db::{Filter, Repository, Sort};
use crate::storage::FileStore;
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use sonovet_models::{Exam, ExamInput, ExamUpdate, RecordMeta};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExamFilter {
    pub patient_id: Option<String>,
}

#[derive(Clone)]
pub struct ExamService {
    exams: Repository<Exam>,
    files: FileStore,
}

impl ExamService {
    pub fn new(exams: Repository<Exam>, files: FileStore) -> Self {
        Self { exams, files }
    }

    /// The referenced patient is not checked here; a dangling reference
    /// surfaces when the exam is exported.
    pub async fn create(&self, input: ExamInput) -> Result<Exam> {
        sonovet_models::validate(&input)?;
        let meta = RecordMeta::generate();
        let exam = Exam::new(meta.id, meta.created_at, input);
        self.exams.insert(&exam).await?;
        tracing::info!(exam_id = %exam.id, patient_id = %exam.patient_id, "Exam created");
        Ok(exam)
    }

    /// Newest exam first.
    pub async fn list(&self, filter: &ExamFilter) -> Result<Vec<Exam>> {
        let filter = Filter::all().eq_opt(
            "patient_id",
            filter
                .patient_id
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty()),
        );
        self.exams
            .find(&filter, Some(Sort::desc("exam_date")))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Exam> {
        self.exams.require(id).await
    }

    /// Overwrites `organs_data` and/or `final_report`, whichever is present.
    pub async fn update(&self, id: &str, update: ExamUpdate) -> Result<Exam> {
        sonovet_models::validate(&update)?;
        let update = update.normalized();
        if update.is_empty() {
            return self.exams.require(id).await;
        }

        let mut fields = Map::new();
        if let Some(organs) = update.organs_data {
            fields.insert("organs_data".to_string(), serde_json::to_value(organs)?);
        }
        if let Some(report) = update.final_report {
            fields.insert("final_report".to_string(), JsonValue::String(report));
        }

        let exam = self
            .exams
            .update_fields(id, fields)
            .await?
            .ok_or_else(|| Error::not_found("Exam", id))?;
        tracing::info!(exam_id = %id, organs = exam.organs_data.len(), "Exam updated");
        Ok(exam)
    }

    /// Removes the exam, then its image files and exported report.
    ///
    /// File removal is best-effort: failures are logged and the delete still
    /// succeeds.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let exam = self.exams.require(id).await?;
        if !self.exams.delete(id).await? {
            return Err(Error::not_found("Exam", id));
        }

        for image in &exam.images {
            let path = self.files.image_path(&image.filename);
            if let Err(e) = self.files.remove_if_exists(&path).await {
                tracing::warn!(exam_id = %id, image_id = %image.id, error = %e, "Failed to remove image file");
            }
        }
        let report = self
            .files
            .report_path(&sonovet_report::storage_file_name(&exam.id));
        if let Err(e) = self.files.remove_if_exists(&report).await {
            tracing::warn!(exam_id = %id, error = %e, "Failed to remove exported report");
        }

        tracing::info!(exam_id = %id, images = exam.images.len(), "Exam deleted");
        Ok(())
    }
}
