pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Errors from a document store.
///
/// "No matching record" is not an error: lookup operations return `None` so
/// callers can tell an expected miss from a transport or driver failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate value for {0}")]
    Duplicate(String),

    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Backend(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Case-insensitive substring filter on one document field.
#[derive(Debug, Clone, Copy)]
pub struct NameFilter<'a> {
    pub field: &'a str,
    pub contains: &'a str,
}

/// Key- and filter-based CRUD over schema-flexible JSON documents, grouped
/// into named collections.
///
/// The production implementation is [`PgDocumentStore`];
/// [`MemoryDocumentStore`] implements the same contract for tests and local
/// development. Services depend on this trait only, so nothing above the
/// store needs a live database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents in a collection, in insertion order, optionally
    /// narrowed by a case-insensitive substring match on one field.
    async fn find_all(
        &self,
        collection: &str,
        filter: Option<NameFilter<'_>>,
    ) -> Result<Vec<Value>, StoreError>;

    /// First document whose `field` equals `value` exactly.
    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, StoreError>;

    async fn find_by_key(&self, collection: &str, key: Uuid) -> Result<Option<Value>, StoreError>;

    /// Insert a document under `key` and return it as stored.
    async fn insert(
        &self,
        collection: &str,
        key: Uuid,
        document: Value,
    ) -> Result<Value, StoreError>;

    /// Merge `patch` into the document under `key` and return the
    /// post-update snapshot. The merge and the read are a single atomic
    /// operation; `None` means no document matched.
    async fn apply_patch(
        &self,
        collection: &str,
        key: Uuid,
        patch: Map<String, Value>,
    ) -> Result<Option<Value>, StoreError>;

    /// Remove the document under `key`, returning the removed snapshot.
    async fn delete(&self, collection: &str, key: Uuid) -> Result<Option<Value>, StoreError>;

    /// Connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
