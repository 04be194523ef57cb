//! In-process document store
//!
//! Keeps every collection in insertion order behind a single `RwLock`.
//! Used by the test suite and by `database.backend = "memory"`.

use super::traits::{Collection, DocumentStore, Filter, Sort, SortDirection};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<(String, JsonValue)>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: Collection, id: &str, document: JsonValue) -> Result<()> {
        let mut guard = self.collections.write().await;
        let docs = guard.entry(collection).or_default();
        if docs.iter().any(|(existing, _)| existing == id) {
            return Err(Error::Internal(format!(
                "duplicate id '{id}' in collection {collection}"
            )));
        }
        docs.push((id.to_string(), document));
        Ok(())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<JsonValue>> {
        let guard = self.collections.read().await;
        Ok(guard.get(&collection).and_then(|docs| {
            docs.iter()
                .find(|(_, doc)| filter.matches(doc))
                .map(|(_, doc)| doc.clone())
        }))
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: Option<Sort>,
    ) -> Result<Vec<JsonValue>> {
        let guard = self.collections.read().await;
        let mut found: Vec<JsonValue> = guard
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| filter.matches(doc))
                    .map(|(_, doc)| doc.clone())
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = sort {
            found.sort_by(|a, b| {
                compare_fields(a.get(sort.field), b.get(sort.field), sort.direction)
            });
        }
        Ok(found)
    }

    async fn replace(
        &self,
        collection: Collection,
        id: &str,
        document: JsonValue,
    ) -> Result<bool> {
        let mut guard = self.collections.write().await;
        let slot = guard
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|(existing, _)| existing == id));
        match slot {
            Some((_, stored)) => {
                *stored = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, JsonValue>,
    ) -> Result<Option<JsonValue>> {
        let mut guard = self.collections.write().await;
        let slot = guard
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|(existing, _)| existing == id));
        let Some((_, stored)) = slot else {
            return Ok(None);
        };
        if let JsonValue::Object(body) = stored {
            body.extend(fields);
        }
        Ok(Some(stored.clone()))
    }

    async fn push_element(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        element: JsonValue,
    ) -> Result<Option<JsonValue>> {
        let mut guard = self.collections.write().await;
        let slot = guard
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|(existing, _)| existing == id));
        let Some((_, stored)) = slot else {
            return Ok(None);
        };
        if let JsonValue::Object(body) = stored {
            let array = body
                .entry(field)
                .or_insert_with(|| JsonValue::Array(Vec::new()));
            match array {
                JsonValue::Array(items) => items.push(element),
                other => *other = JsonValue::Array(vec![element]),
            }
        }
        Ok(Some(stored.clone()))
    }

    async fn pull_element(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        element_id: &str,
    ) -> Result<Option<JsonValue>> {
        let mut guard = self.collections.write().await;
        let slot = guard
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|(existing, _)| existing == id));
        let Some((_, stored)) = slot else {
            return Ok(None);
        };
        if let Some(JsonValue::Array(items)) = stored.get_mut(field) {
            items.retain(|item| item.get("id").and_then(JsonValue::as_str) != Some(element_id));
        }
        Ok(Some(stored.clone()))
    }

    async fn upsert(&self, collection: Collection, id: &str, document: JsonValue) -> Result<()> {
        let mut guard = self.collections.write().await;
        let docs = guard.entry(collection).or_default();
        match docs.iter_mut().find(|(existing, _)| existing == id) {
            Some((_, stored)) => *stored = document,
            None => docs.push((id.to_string(), document)),
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool> {
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|(existing, _)| existing != id);
        Ok(docs.len() < before)
    }

    async fn delete_many(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|(_, doc)| !filter.matches(doc));
        Ok((before - docs.len()) as u64)
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .map(|docs| docs.iter().filter(|(_, doc)| filter.matches(doc)).count() as u64)
            .unwrap_or(0))
    }
}

/// `jsonb` ordering of two optional field values; missing fields sort last
/// in either direction.
fn compare_fields(
    a: Option<&JsonValue>,
    b: Option<&JsonValue>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            SortDirection::Ascending => compare_json(a, b),
            SortDirection::Descending => compare_json(a, b).reverse(),
        },
    }
}

fn compare_json(a: &JsonValue, b: &JsonValue) -> Ordering {
    match (a, b) {
        (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
        (JsonValue::Number(x), JsonValue::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &JsonValue) -> u8 {
    match value {
        JsonValue::Null => 0,
        JsonValue::String(_) => 1,
        JsonValue::Number(_) => 2,
        JsonValue::Bool(_) => 3,
        JsonValue::Array(_) => 4,
        JsonValue::Object(_) => 5,
    }
}
