//! Database layer - document store backends and typed repositories

pub mod memory;
pub mod postgres;
pub mod repository;
pub mod traits;

pub use memory::MemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use repository::{Document, Repository};
pub use traits::{Collection, DocumentStore, Filter, Sort, SortDirection};

use crate::config::{DatabaseBackend, DatabaseConfig};
use crate::Result;
use std::sync::Arc;

/// Opens the configured backend.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.backend {
        DatabaseBackend::Postgres => {
            let store = PostgresDocumentStore::connect(config).await?;
            tracing::info!(schema = %config.name, "Connected to PostgreSQL document store");
            Ok(Arc::new(store))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on shutdown");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
    }
}
