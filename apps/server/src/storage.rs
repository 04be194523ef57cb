//! Filesystem storage for exam images and exported reports

use crate::config::StorageConfig;
use crate::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    images_dir: PathBuf,
    reports_dir: PathBuf,
}

impl FileStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            images_dir: config.images_dir(),
            reports_dir: config.reports_dir(),
        }
    }

    pub async fn ensure_dirs(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.images_dir).await?;
        tokio::fs::create_dir_all(&self.reports_dir).await?;
        Ok(())
    }

    /// Path of a stored image. Only the final component of `filename` is used.
    pub fn image_path(&self, filename: &str) -> PathBuf {
        self.images_dir.join(file_component(filename))
    }

    pub fn report_path(&self, filename: &str) -> PathBuf {
        self.reports_dir.join(file_component(filename))
    }

    /// Writes `bytes`, replacing any existing file.
    pub async fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }

    /// Reads a file, returning `None` when it does not exist.
    pub async fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes a file. A missing file is not an error; returns whether one was removed.
    pub async fn remove_if_exists(&self, path: &Path) -> Result<bool> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn file_component(name: &str) -> &str {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("_")
}
