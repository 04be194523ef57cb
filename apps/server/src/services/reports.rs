//! Exam report export

use crate::db::Repository;
use crate::storage::FileStore;
use crate::{metrics, Error, Result};
use sonovet_models::{Exam, Patient, Settings, SETTINGS_ID};
use sonovet_report::{
    build_exam_report, download_file_name, render_pdf, storage_file_name, ReportContext,
    ReportDocument,
};
use std::path::PathBuf;

/// A rendered report and where it was written.
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub document: ReportDocument,
    pub bytes: Vec<u8>,
    /// Name offered to the client: `laudo_<patient>_<YYYYMMDD>.pdf`.
    pub download_name: String,
    pub stored_at: PathBuf,
}

#[derive(Clone)]
pub struct ReportService {
    patients: Repository<Patient>,
    exams: Repository<Exam>,
    settings: Repository<Settings>,
    files: FileStore,
}

impl ReportService {
    pub fn new(
        patients: Repository<Patient>,
        exams: Repository<Exam>,
        settings: Repository<Settings>,
        files: FileStore,
    ) -> Self {
        Self {
            patients,
            exams,
            settings,
            files,
        }
    }

    pub async fn export(&self, exam_id: &str) -> Result<ExportedReport> {
        let result = self.export_inner(exam_id).await;
        let status = if result.is_ok() { "success" } else { "failure" };
        metrics::REPORT_EXPORTS_TOTAL
            .with_label_values(&[status])
            .inc();
        result
    }

    async fn export_inner(&self, exam_id: &str) -> Result<ExportedReport> {
        let exam = self.exams.require(exam_id).await?;
        let patient = self
            .patients
            .get(&exam.patient_id)
            .await?
            .ok_or_else(|| Error::not_found("Patient", exam.patient_id.clone()))?;
        // Settings are optional here; a missing record only drops the letterhead.
        let settings = self.settings.get(SETTINGS_ID).await?;

        let document = build_exam_report(ReportContext {
            patient: &patient,
            exam: &exam,
            settings: settings.as_ref(),
        });

        let to_render = document.clone();
        let bytes = tokio::task::spawn_blocking(move || render_pdf(&to_render))
            .await
            .map_err(|e| Error::Internal(format!("report rendering task failed: {e}")))??;

        let stored_at = self.files.report_path(&storage_file_name(&exam.id));
        self.files.write(&stored_at, &bytes).await?;

        metrics::REPORT_SIZE_BYTES
            .with_label_values(&["pdf"])
            .observe(bytes.len() as f64);
        tracing::info!(
            exam_id = %exam.id,
            patient_id = %patient.id,
            bytes = bytes.len(),
            path = %stored_at.display(),
            "Report exported"
        );

        Ok(ExportedReport {
            document,
            bytes,
            download_name: download_file_name(&patient.name, &exam.exam_date),
            stored_at,
        })
    }
}
