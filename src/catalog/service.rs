use chrono::Utc;
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use super::patch::{build_patch, PatchError};
use super::repository::Repository;
use super::CatalogResource;
use crate::database::{DocumentStore, StoreError};

/// Sentinel outcomes of a catalog operation, resolved to HTTP status codes
/// at the handler boundary. The first three are expected, client-correctable
/// conditions; `Timeout` and `Store` are surfaced as generic failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid ID")]
    InvalidId,

    #[error("not found")]
    NotFound,

    #[error("at least one field must be provided for update")]
    NoUpdateData,

    #[error("storage operation timed out")]
    Timeout,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Request-scoped orchestration for one catalog entity type: identifier
/// parsing, timestamps, empty-update rejection, and translation of
/// repository misses into [`ServiceError::NotFound`].
pub struct CatalogService<R: CatalogResource> {
    repo: Repository<R>,
    timeout: Duration,
}

impl<R: CatalogResource> CatalogService<R> {
    pub fn new(store: Arc<dyn DocumentStore>, timeout: Duration) -> Self {
        Self { repo: Repository::new(store), timeout }
    }

    /// Bound the client-side wait on a storage call. The store itself is
    /// not guaranteed to cancel server-side work.
    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, ServiceError> {
        match tokio::time::timeout(self.timeout, op).await {
            Ok(result) => result.map_err(ServiceError::Store),
            Err(_) => Err(ServiceError::Timeout),
        }
    }

    /// All entities, or those whose name field contains `name`
    /// (case-insensitive). An empty filter returns the full collection.
    pub async fn get_all(&self, name: Option<&str>) -> Result<Vec<R::Entity>, ServiceError> {
        let filter = name.filter(|s| !s.is_empty());
        self.bounded(self.repo.find_all(filter)).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<R::Entity, ServiceError> {
        let key = parse_key(id)?;
        self.bounded(self.repo.find_by_key(key))
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Assign a fresh key, stamp both timestamps with the same instant, and
    /// persist. The returned entity is the document as stored.
    pub async fn create(&self, input: R::Create) -> Result<R::Entity, ServiceError> {
        let key = Uuid::new_v4();
        let now = Utc::now();

        let mut doc = match serde_json::to_value(&input).map_err(StoreError::from)? {
            Value::Object(doc) => doc,
            _ => {
                return Err(ServiceError::Store(StoreError::Backend(
                    "creation payload did not serialize to an object".to_string(),
                )))
            }
        };
        doc.insert("id".to_string(), json!(key));
        doc.insert("createdAt".to_string(), json!(now));
        doc.insert("updatedAt".to_string(), json!(now));

        self.bounded(self.repo.insert(key, Value::Object(doc))).await
    }

    /// Apply a partial update and return the post-update snapshot.
    pub async fn update(&self, id: &str, patch: R::Patch) -> Result<R::Entity, ServiceError> {
        let key = parse_key(id)?;

        let fields = build_patch(&patch, Utc::now()).map_err(|e| match e {
            PatchError::Empty => ServiceError::NoUpdateData,
            PatchError::Serialization(e) => ServiceError::Store(e.into()),
        })?;

        self.bounded(self.repo.apply_patch(key, fields))
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Remove an entity, returning the removed snapshot.
    pub async fn delete(&self, id: &str) -> Result<R::Entity, ServiceError> {
        let key = parse_key(id)?;
        self.bounded(self.repo.delete(key))
            .await?
            .ok_or(ServiceError::NotFound)
    }
}

fn parse_key(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id).map_err(|_| ServiceError::InvalidId)
}
