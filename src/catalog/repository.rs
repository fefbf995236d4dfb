use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use super::CatalogResource;
use crate::database::{DocumentStore, NameFilter, StoreError};

/// Typed per-entity repository over the document store.
///
/// Scopes every call to the resource's collection and converts stored
/// documents into the entity type. A lookup miss is `None`; everything else
/// is a [`StoreError`].
pub struct Repository<R: CatalogResource> {
    store: Arc<dyn DocumentStore>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: CatalogResource> Repository<R> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, _resource: PhantomData }
    }

    pub async fn find_all(&self, name_contains: Option<&str>) -> Result<Vec<R::Entity>, StoreError> {
        let filter = name_contains.map(|contains| NameFilter { field: R::NAME_FIELD, contains });
        let docs = self.store.find_all(R::COLLECTION, filter).await?;
        docs.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }

    pub async fn find_by_key(&self, key: Uuid) -> Result<Option<R::Entity>, StoreError> {
        let doc = self.store.find_by_key(R::COLLECTION, key).await?;
        decode_optional(doc)
    }

    pub async fn insert(&self, key: Uuid, document: Value) -> Result<R::Entity, StoreError> {
        let stored = self.store.insert(R::COLLECTION, key, document).await?;
        Ok(serde_json::from_value(stored)?)
    }

    pub async fn apply_patch(
        &self,
        key: Uuid,
        patch: Map<String, Value>,
    ) -> Result<Option<R::Entity>, StoreError> {
        let doc = self.store.apply_patch(R::COLLECTION, key, patch).await?;
        decode_optional(doc)
    }

    pub async fn delete(&self, key: Uuid) -> Result<Option<R::Entity>, StoreError> {
        let doc = self.store.delete(R::COLLECTION, key).await?;
        decode_optional(doc)
    }
}

fn decode_optional<T: serde::de::DeserializeOwned>(
    doc: Option<Value>,
) -> Result<Option<T>, StoreError> {
    match doc {
        None => Ok(None),
        Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
    }
}
