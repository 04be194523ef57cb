//! Shared application state

use crate::config::Config;
use crate::db::{self, DocumentStore, Repository};
use crate::services::{
    BackupService, ExamService, ImageService, MetricsService, PatientService,
    ReferenceValueService, ReportService, SeedService, SettingsService, TemplateService,
};
use crate::storage::FileStore;
use crate::Result;
use std::sync::Arc;

/// Handles shared by every request. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn DocumentStore>,
    pub patients: Arc<PatientService>,
    pub exams: Arc<ExamService>,
    pub templates: Arc<TemplateService>,
    pub reference_values: Arc<ReferenceValueService>,
    pub settings: Arc<SettingsService>,
    pub images: Arc<ImageService>,
    pub reports: Arc<ReportService>,
    pub seed: Arc<SeedService>,
    pub backup: Arc<BackupService>,
    pub metrics: Arc<MetricsService>,
}

impl AppState {
    /// Connects the configured store and prepares the upload directories.
    pub async fn new(config: Config) -> Result<Self> {
        let store = db::connect(&config.database).await?;
        Self::with_store(config, store).await
    }

    pub async fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Result<Self> {
        let files = FileStore::new(&config.storage);
        files.ensure_dirs().await?;
        tracing::info!(
            upload_dir = %config.storage.upload_dir.display(),
            store = store.backend(),
            "Storage ready"
        );

        let patients = Repository::new(store.clone());
        let exams = Repository::new(store.clone());
        let templates = Repository::new(store.clone());
        let reference_values = Repository::new(store.clone());
        let settings = Repository::new(store.clone());

        Ok(Self {
            patients: Arc::new(PatientService::new(patients.clone())),
            exams: Arc::new(ExamService::new(exams.clone(), files.clone())),
            templates: Arc::new(TemplateService::new(templates.clone())),
            reference_values: Arc::new(ReferenceValueService::new(reference_values.clone())),
            settings: Arc::new(SettingsService::new(settings.clone())),
            images: Arc::new(ImageService::new(
                exams.clone(),
                files.clone(),
                &config.storage,
            )),
            reports: Arc::new(ReportService::new(
                patients.clone(),
                exams.clone(),
                settings.clone(),
                files,
            )),
            seed: Arc::new(SeedService::new(templates.clone(), reference_values.clone())),
            backup: Arc::new(BackupService::new(
                patients,
                exams,
                templates,
                reference_values,
                settings,
            )),
            metrics: Arc::new(MetricsService::new(store.clone())),
            config: Arc::new(config),
            store,
        })
    }

    /// Releases the store handle.
    pub async fn shutdown(&self) {
        self.store.close().await;
        tracing::info!("Document store closed");
    }
}
