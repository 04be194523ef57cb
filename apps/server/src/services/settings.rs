//! Clinic settings singleton

use crate::db::Repository;
use crate::Result;
use sonovet_models::{Settings, SETTINGS_ID};

#[derive(Clone)]
pub struct SettingsService {
    settings: Repository<Settings>,
}

impl SettingsService {
    pub fn new(settings: Repository<Settings>) -> Self {
        Self { settings }
    }

    /// Returns the stored settings, creating the default record on first read.
    pub async fn get(&self) -> Result<Settings> {
        if let Some(settings) = self.settings.get(SETTINGS_ID).await? {
            return Ok(settings);
        }
        let defaults = Settings::default();
        self.settings.upsert(&defaults).await?;
        tracing::info!("Default settings created");
        Ok(defaults)
    }

    /// Upserts regardless of prior existence. The id is always the singleton id.
    pub async fn put(&self, settings: Settings) -> Result<Settings> {
        let settings = settings.normalized();
        self.settings.upsert(&settings).await?;
        tracing::info!(
            letterhead = settings.has_letterhead(),
            "Settings saved"
        );
        Ok(settings)
    }
}
