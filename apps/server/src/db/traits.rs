//! Core traits for document storage backends

use crate::Result;
use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Named document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Patients,
    Exams,
    Templates,
    ReferenceValues,
    Settings,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Patients,
        Collection::Exams,
        Collection::Templates,
        Collection::ReferenceValues,
        Collection::Settings,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Patients => "patients",
            Collection::Exams => "exams",
            Collection::Templates => "templates",
            Collection::ReferenceValues => "reference_values",
            Collection::Settings => "settings",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// JSON containment filter.
///
/// A document matches when it contains the filter object: scalar fields
/// compare by equality, and an array pattern matches when each of its
/// elements is contained in some element of the document's array. This is
/// PostgreSQL's `@>` operator on `jsonb`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Map<String, JsonValue>);

impl Filter {
    /// Matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: &str) -> Self {
        Self::all().eq("id", id)
    }

    pub fn eq(mut self, field: &str, value: impl Into<JsonValue>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    /// Adds an equality predicate only when a value is given.
    pub fn eq_opt<V: Into<JsonValue>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.eq(field, v),
            None => self,
        }
    }

    /// Matches documents whose array `field` has an element containing `element`.
    pub fn contains_element(mut self, field: &str, element: JsonValue) -> Self {
        self.0
            .insert(field.to_string(), JsonValue::Array(vec![element]));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_json(&self) -> JsonValue {
        JsonValue::Object(self.0.clone())
    }

    pub fn matches(&self, document: &JsonValue) -> bool {
        json_contains(document, &JsonValue::Object(self.0.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Ordering on a single top-level field. Ties keep insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// Storage operations over schemaless JSON documents.
///
/// Every document carries a string `id` field that is unique within its
/// collection. Backends keep insertion order for unsorted reads.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs and the service info endpoint.
    fn backend(&self) -> &'static str;

    /// Inserts a new document. The id must not already exist.
    async fn insert(&self, collection: Collection, id: &str, document: JsonValue) -> Result<()>;

    async fn find_one(&self, collection: Collection, filter: &Filter)
        -> Result<Option<JsonValue>>;

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: Option<Sort>,
    ) -> Result<Vec<JsonValue>>;

    /// Replaces the whole document. Returns `false` when the id is absent.
    async fn replace(&self, collection: Collection, id: &str, document: JsonValue)
        -> Result<bool>;

    /// Merges `fields` into the top level of the stored document and returns
    /// the result, or `None` when the id is absent.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, JsonValue>,
    ) -> Result<Option<JsonValue>>;

    /// Appends `element` to the array `field` in one atomic step, creating
    /// the array when it is missing. Returns the updated document, or `None`
    /// when the id is absent.
    async fn push_element(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        element: JsonValue,
    ) -> Result<Option<JsonValue>>;

    /// Removes every element of the array `field` whose `id` equals
    /// `element_id`, in one atomic step. Returns the updated document, or
    /// `None` when the id is absent.
    async fn pull_element(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        element_id: &str,
    ) -> Result<Option<JsonValue>>;

    /// Inserts or replaces.
    async fn upsert(&self, collection: Collection, id: &str, document: JsonValue) -> Result<()>;

    /// Returns `false` when the id is absent.
    async fn delete(&self, collection: Collection, id: &str) -> Result<bool>;

    async fn delete_many(&self, collection: Collection, filter: &Filter) -> Result<u64>;

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64>;

    /// Releases backend resources. Called once on shutdown.
    async fn close(&self) {}
}

/// `jsonb @>` containment on `serde_json` values.
pub fn json_contains(document: &JsonValue, pattern: &JsonValue) -> bool {
    match (document, pattern) {
        (JsonValue::Object(doc), JsonValue::Object(pat)) => pat
            .iter()
            .all(|(key, p)| doc.get(key).is_some_and(|d| json_contains(d, p))),
        (JsonValue::Array(doc), JsonValue::Array(pat)) => pat
            .iter()
            .all(|p| doc.iter().any(|d| json_contains(d, p))),
        (JsonValue::Number(a), JsonValue::Number(b)) => a.as_f64() == b.as_f64(),
        (a, b) => a == b,
    }
}
