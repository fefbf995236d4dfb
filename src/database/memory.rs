use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use super::{DocumentStore, NameFilter, StoreError};

/// In-memory document store implementing the same contract as
/// [`super::PgDocumentStore`]. Collections keep insertion order; unique
/// fields are declared up front and enforced on insert.
///
/// Used by the test suites and usable for local development without a
/// database.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, Vec<(Uuid, Value)>>>,
    unique: HashMap<String, Vec<&'static str>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a unique document field for a collection.
    pub fn with_unique(mut self, collection: &str, field: &'static str) -> Self {
        self.unique.entry(collection.to_string()).or_default().push(field);
        self
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_all(
        &self,
        collection: &str,
        filter: Option<NameFilter<'_>>,
    ) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.lock().unwrap();
        let docs = collections.get(collection).map(Vec::as_slice).unwrap_or(&[]);

        let matches = docs
            .iter()
            .filter(|(_, doc)| match filter {
                None => true,
                Some(f) => doc
                    .get(f.field)
                    .and_then(Value::as_str)
                    .map_or(false, |s| s.to_lowercase().contains(&f.contains.to_lowercase())),
            })
            .map(|(_, doc)| doc.clone())
            .collect();

        Ok(matches)
    }

    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.lock().unwrap();
        let docs = collections.get(collection).map(Vec::as_slice).unwrap_or(&[]);

        Ok(docs
            .iter()
            .find(|(_, doc)| doc.get(field).and_then(Value::as_str) == Some(value))
            .map(|(_, doc)| doc.clone()))
    }

    async fn find_by_key(&self, collection: &str, key: Uuid) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|(id, _)| *id == key))
            .map(|(_, doc)| doc.clone()))
    }

    async fn insert(
        &self,
        collection: &str,
        key: Uuid,
        document: Value,
    ) -> Result<Value, StoreError> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(fields) = self.unique.get(collection) {
            for field in fields {
                let candidate = document.get(*field);
                if candidate.is_some()
                    && docs.iter().any(|(_, doc)| doc.get(*field) == candidate)
                {
                    return Err(StoreError::Duplicate(format!("{}_{}_key", collection, field)));
                }
            }
        }

        docs.push((key, document.clone()));
        Ok(document)
    }

    async fn apply_patch(
        &self,
        collection: &str,
        key: Uuid,
        patch: Map<String, Value>,
    ) -> Result<Option<Value>, StoreError> {
        let mut collections = self.collections.lock().unwrap();
        let entry = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|(id, _)| *id == key));

        let Some((_, doc)) = entry else {
            return Ok(None);
        };

        if let Value::Object(fields) = doc {
            for (k, v) in patch {
                fields.insert(k, v);
            }
        }

        Ok(Some(doc.clone()))
    }

    async fn delete(&self, collection: &str, key: Uuid) -> Result<Option<Value>, StoreError> {
        let mut collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };

        let position = docs.iter().position(|(id, _)| *id == key);
        Ok(position.map(|i| docs.remove(i).1))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
