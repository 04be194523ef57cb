//! Metrics service for collecting application metrics

use crate::db::{Collection, DocumentStore, Filter};
use std::sync::Arc;

/// Service for collecting application metrics
pub struct MetricsService {
    store: Arc<dyn DocumentStore>,
}

impl MetricsService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Refresh the per-collection document gauges
    pub async fn update_document_counts(&self) {
        for collection in Collection::ALL {
            match self.store.count(collection, &Filter::all()).await {
                Ok(count) => crate::metrics::DOCUMENTS_TOTAL
                    .with_label_values(&[collection.name()])
                    .set(count as i64),
                Err(e) => {
                    tracing::warn!(collection = %collection, error = %e, "Failed to count documents")
                }
            }
        }
    }

    /// Collect all custom application metrics
    pub async fn collect_custom_metrics(&self, server_version: &str) -> String {
        self.update_document_counts().await;

        let mut output = String::new();
        output.push_str("# HELP sonovet_server_info Sonovet server information\n");
        output.push_str("# TYPE sonovet_server_info gauge\n");
        output.push_str(&format!(
            "sonovet_server_info{{version=\"{}\",store=\"{}\"}} 1\n",
            server_version,
            self.store.backend()
        ));
        output
    }
}
