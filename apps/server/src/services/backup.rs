//! Whole-database snapshot and restore
//!
//! A snapshot carries every stored record. Image and report files are not
//! included. On restore, each collection present in the payload replaces the
//! stored collection; absent collections are left alone.

use crate::db::{Document, Filter, Repository};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sonovet_models::{Exam, Patient, ReferenceValue, Settings, TemplateText, SETTINGS_ID};

pub const BACKUP_VERSION: u32 = 1;

fn default_version() -> u32 {
    BACKUP_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, with = "sonovet_models::timestamp::option")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub patients: Option<Vec<Patient>>,
    #[serde(default)]
    pub exams: Option<Vec<Exam>>,
    #[serde(default)]
    pub templates: Option<Vec<TemplateText>>,
    #[serde(default)]
    pub reference_values: Option<Vec<ReferenceValue>>,
    #[serde(default)]
    pub settings: Option<Settings>,
}

/// Records written per restored collection; absent collections are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RestoreSummary {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patients: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exams: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_values: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<usize>,
}

#[derive(Clone)]
pub struct BackupService {
    patients: Repository<Patient>,
    exams: Repository<Exam>,
    templates: Repository<TemplateText>,
    reference_values: Repository<ReferenceValue>,
    settings: Repository<Settings>,
}

impl BackupService {
    pub fn new(
        patients: Repository<Patient>,
        exams: Repository<Exam>,
        templates: Repository<TemplateText>,
        reference_values: Repository<ReferenceValue>,
        settings: Repository<Settings>,
    ) -> Self {
        Self {
            patients,
            exams,
            templates,
            reference_values,
            settings,
        }
    }

    pub async fn export(&self) -> Result<Backup> {
        let backup = Backup {
            version: BACKUP_VERSION,
            exported_at: Some(sonovet_models::timestamp::now()),
            patients: Some(self.patients.find(&Filter::all(), None).await?),
            exams: Some(self.exams.find(&Filter::all(), None).await?),
            templates: Some(self.templates.find(&Filter::all(), None).await?),
            reference_values: Some(self.reference_values.find(&Filter::all(), None).await?),
            settings: self.settings.get(SETTINGS_ID).await?,
        };
        tracing::info!(
            patients = backup.patients.as_ref().map_or(0, Vec::len),
            exams = backup.exams.as_ref().map_or(0, Vec::len),
            "Backup exported"
        );
        Ok(backup)
    }

    /// Not transactional: a failure midway leaves earlier collections restored.
    pub async fn restore(&self, backup: Backup) -> Result<RestoreSummary> {
        let mut summary = RestoreSummary {
            message: "Backup restored successfully".to_string(),
            ..RestoreSummary::default()
        };

        if let Some(records) = backup.patients {
            summary.patients = Some(replace_all(&self.patients, records).await?);
        }
        if let Some(records) = backup.exams {
            summary.exams = Some(replace_all(&self.exams, records).await?);
        }
        if let Some(records) = backup.templates {
            summary.templates = Some(replace_all(&self.templates, records).await?);
        }
        if let Some(records) = backup.reference_values {
            summary.reference_values = Some(replace_all(&self.reference_values, records).await?);
        }
        if let Some(settings) = backup.settings {
            self.settings.upsert(&settings.normalized()).await?;
            summary.settings = Some(1);
        }

        tracing::info!(version = backup.version, ?summary, "Backup restored");
        Ok(summary)
    }
}

/// Clears the collection and writes `records`. Repeated ids collapse to the last one.
async fn replace_all<T: Document>(repo: &Repository<T>, records: Vec<T>) -> Result<usize> {
    repo.delete_all().await?;
    for record in &records {
        repo.upsert(record).await?;
    }
    repo.count(&Filter::all())
        .await
        .map(|count| count as usize)
}
