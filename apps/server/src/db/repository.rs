//! Typed access to document collections

use super::traits::{Collection, DocumentStore, Filter, Sort};
use crate::{metrics, Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use sonovet_models::{Exam, Patient, ReferenceValue, Settings, TemplateText};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

/// An entity stored as one JSON document in a collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;
    /// Display name used in NotFound messages.
    const KIND: &'static str;

    fn id(&self) -> &str;
}

impl Document for Patient {
    const COLLECTION: Collection = Collection::Patients;
    const KIND: &'static str = "Patient";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for Exam {
    const COLLECTION: Collection = Collection::Exams;
    const KIND: &'static str = "Exam";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for TemplateText {
    const COLLECTION: Collection = Collection::Templates;
    const KIND: &'static str = "Template";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for ReferenceValue {
    const COLLECTION: Collection = Collection::ReferenceValues;
    const KIND: &'static str = "Reference value";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for Settings {
    const COLLECTION: Collection = Collection::Settings;
    const KIND: &'static str = "Settings";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Repository over one collection, converting JSON documents to `T`.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub async fn insert(&self, entity: &T) -> Result<()> {
        let started = Instant::now();
        let document = serde_json::to_value(entity)?;
        let result = self
            .store
            .insert(T::COLLECTION, entity.id(), document)
            .await;
        observe("insert", started);
        result
    }

    pub async fn get(&self, id: &str) -> Result<Option<T>> {
        self.find_one(&Filter::by_id(id)).await
    }

    /// Like [`get`](Self::get), failing with NotFound when absent.
    pub async fn require(&self, id: &str) -> Result<T> {
        self.get(id)
            .await?
            .ok_or_else(|| Error::not_found(T::KIND, id))
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<Option<T>> {
        let started = Instant::now();
        let found = self.store.find_one(T::COLLECTION, filter).await;
        observe("find_one", started);
        found?.map(decode).transpose()
    }

    pub async fn find(&self, filter: &Filter, sort: Option<Sort>) -> Result<Vec<T>> {
        let started = Instant::now();
        let found = self.store.find(T::COLLECTION, filter, sort).await;
        observe("find", started);
        found?.into_iter().map(decode).collect()
    }

    /// Replaces the stored record with the same id. Returns `false` when absent.
    pub async fn replace(&self, entity: &T) -> Result<bool> {
        let started = Instant::now();
        let document = serde_json::to_value(entity)?;
        let result = self
            .store
            .replace(T::COLLECTION, entity.id(), document)
            .await;
        observe("replace", started);
        result
    }

    /// Overwrites the given top-level fields and returns the updated record.
    pub async fn update_fields(
        &self,
        id: &str,
        fields: Map<String, JsonValue>,
    ) -> Result<Option<T>> {
        let started = Instant::now();
        let updated = self.store.update(T::COLLECTION, id, fields).await;
        observe("update", started);
        updated?.map(decode).transpose()
    }

    /// Atomically appends `element` to the array `field` and returns the
    /// updated record, or `None` when the id is absent.
    pub async fn push_element<E: Serialize>(
        &self,
        id: &str,
        field: &str,
        element: &E,
    ) -> Result<Option<T>> {
        let started = Instant::now();
        let element = serde_json::to_value(element)?;
        let updated = self
            .store
            .push_element(T::COLLECTION, id, field, element)
            .await;
        observe("push_element", started);
        updated?.map(decode).transpose()
    }

    /// Atomically drops the elements of the array `field` whose `id` is
    /// `element_id`.
    pub async fn pull_element(
        &self,
        id: &str,
        field: &str,
        element_id: &str,
    ) -> Result<Option<T>> {
        let started = Instant::now();
        let updated = self
            .store
            .pull_element(T::COLLECTION, id, field, element_id)
            .await;
        observe("pull_element", started);
        updated?.map(decode).transpose()
    }

    pub async fn upsert(&self, entity: &T) -> Result<()> {
        let started = Instant::now();
        let document = serde_json::to_value(entity)?;
        let result = self
            .store
            .upsert(T::COLLECTION, entity.id(), document)
            .await;
        observe("upsert", started);
        result
    }

    /// Returns `false` when the id is absent.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let started = Instant::now();
        let result = self.store.delete(T::COLLECTION, id).await;
        observe("delete", started);
        result
    }

    pub async fn delete_all(&self) -> Result<u64> {
        let started = Instant::now();
        let result = self.store.delete_many(T::COLLECTION, &Filter::all()).await;
        observe("delete_many", started);
        result
    }

    pub async fn count(&self, filter: &Filter) -> Result<u64> {
        let started = Instant::now();
        let result = self.store.count(T::COLLECTION, filter).await;
        observe("count", started);
        result
    }
}

fn decode<T: DeserializeOwned>(document: JsonValue) -> Result<T> {
    serde_json::from_value(document).map_err(Error::from)
}

fn observe(operation: &str, started: Instant) {
    metrics::STORE_OPERATION_DURATION
        .with_label_values(&[operation])
        .observe(started.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDocumentStore;
    use sonovet_models::{TemplateCategory, TemplateInput};

    fn template(order: i64) -> TemplateText {
        TemplateText::new(
            uuid::Uuid::new_v4().to_string(),
            TemplateInput {
                organ: "Baço".into(),
                category: TemplateCategory::Normal,
                text: format!("texto {order}"),
                order,
            },
        )
    }

    #[tokio::test]
    async fn typed_round_trip() {
        let repo: Repository<TemplateText> =
            Repository::new(Arc::new(MemoryDocumentStore::new()));
        let first = template(2);
        let second = template(1);
        repo.insert(&first).await.unwrap();
        repo.insert(&second).await.unwrap();

        assert_eq!(repo.require(&first.id).await.unwrap(), first);
        let sorted = repo.find(&Filter::all(), Some(Sort::asc("order"))).await.unwrap();
        assert_eq!(sorted, vec![second.clone(), first.clone()]);
        assert_eq!(repo.count(&Filter::all()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn require_reports_kind() {
        let repo: Repository<TemplateText> =
            Repository::new(Arc::new(MemoryDocumentStore::new()));
        let err = repo.require("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Template not found");
    }
}
