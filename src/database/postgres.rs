use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{DocumentStore, NameFilter, StoreError};

/// Document store backed by Postgres.
///
/// Each collection is one table of `(id UUID PRIMARY KEY, doc JSONB,
/// created_at)`; `created_at` exists only to keep listing in insertion
/// order. Patches merge server-side (`doc || $patch`) with `RETURNING doc`,
/// so update-and-read is one atomic round trip.
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create collection tables if they do not exist yet.
    pub async fn ensure_collections(&self, collections: &[&str]) -> Result<(), StoreError> {
        for collection in collections {
            let sql = format!(
                "CREATE TABLE IF NOT EXISTS {} (\
                 id UUID PRIMARY KEY, \
                 doc JSONB NOT NULL, \
                 created_at TIMESTAMPTZ NOT NULL DEFAULT now())",
                quote_identifier(collection)
            );
            sqlx::query(&sql).execute(&self.pool).await?;
        }
        info!("ensured {} collections", collections.len());
        Ok(())
    }

    /// Enforce uniqueness of a document field within a collection.
    /// Violations surface from `insert` as [`StoreError::Duplicate`].
    pub async fn ensure_unique(&self, collection: &str, field: &str) -> Result<(), StoreError> {
        let sql = format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} ((doc->>'{}'))",
            quote_identifier(&format!("{}_{}_key", collection, field)),
            quote_identifier(collection),
            field
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_all(
        &self,
        collection: &str,
        filter: Option<NameFilter<'_>>,
    ) -> Result<Vec<Value>, StoreError> {
        let table = quote_identifier(collection);

        let docs = match filter {
            None => {
                let sql = format!("SELECT doc FROM {} ORDER BY created_at, id", table);
                sqlx::query_scalar::<_, Value>(&sql).fetch_all(&self.pool).await?
            }
            Some(filter) => {
                let sql = format!(
                    "SELECT doc FROM {} WHERE doc->>$1 ILIKE '%' || $2 || '%' \
                     ORDER BY created_at, id",
                    table
                );
                sqlx::query_scalar::<_, Value>(&sql)
                    .bind(filter.field)
                    .bind(escape_like(filter.contains))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(docs)
    }

    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, StoreError> {
        let sql = format!(
            "SELECT doc FROM {} WHERE doc->>$1 = $2 LIMIT 1",
            quote_identifier(collection)
        );
        let doc = sqlx::query_scalar::<_, Value>(&sql)
            .bind(field)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn find_by_key(&self, collection: &str, key: Uuid) -> Result<Option<Value>, StoreError> {
        let sql = format!("SELECT doc FROM {} WHERE id = $1", quote_identifier(collection));
        let doc = sqlx::query_scalar::<_, Value>(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn insert(
        &self,
        collection: &str,
        key: Uuid,
        document: Value,
    ) -> Result<Value, StoreError> {
        let sql = format!(
            "INSERT INTO {} (id, doc) VALUES ($1, $2) RETURNING doc",
            quote_identifier(collection)
        );
        let doc = sqlx::query_scalar::<_, Value>(&sql)
            .bind(key)
            .bind(document)
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)?;
        Ok(doc)
    }

    async fn apply_patch(
        &self,
        collection: &str,
        key: Uuid,
        patch: Map<String, Value>,
    ) -> Result<Option<Value>, StoreError> {
        let sql = format!(
            "UPDATE {} SET doc = doc || $2 WHERE id = $1 RETURNING doc",
            quote_identifier(collection)
        );
        let doc = sqlx::query_scalar::<_, Value>(&sql)
            .bind(key)
            .bind(Value::Object(patch))
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn delete(&self, collection: &str, key: Uuid) -> Result<Option<Value>, StoreError> {
        let sql = format!(
            "DELETE FROM {} WHERE id = $1 RETURNING doc",
            quote_identifier(collection)
        );
        let doc = sqlx::query_scalar::<_, Value>(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doc)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Quote a SQL identifier to prevent injection.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Escape LIKE wildcards in user-supplied search text.
fn escape_like(input: &str) -> String {
    input.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

fn map_unique_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some("23505") {
            let constraint = db.constraint().unwrap_or("unique field").to_string();
            return StoreError::Duplicate(constraint);
        }
    }
    StoreError::Sqlx(err)
}
