//! Generic document-backed resource stack.
//!
//! The five catalog entities share one repository/service/handler
//! implementation, parameterized by a [`CatalogResource`] descriptor:
//! the collection it lives in, the field its search filter matches, the
//! nouns its error messages use, and its validation rule tables.

pub mod patch;
pub mod repository;
pub mod service;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::validation::FieldSpec;

/// Descriptor for one catalog entity type.
pub trait CatalogResource: Send + Sync + 'static {
    /// Collection (and route segment) name, e.g. `"platforms"`.
    const COLLECTION: &'static str;
    /// Lowercase singular noun for messages, e.g. `"platform"`.
    const SINGULAR: &'static str;
    /// Capitalized singular noun for messages, e.g. `"Platform"`.
    const TITLE: &'static str;
    /// Document field the free-text list filter matches against.
    const NAME_FIELD: &'static str;
    /// Patchable fields, listed for the empty-update message,
    /// e.g. `"name or manufacturer"`.
    const PATCH_FIELDS: &'static str;

    /// Stored shape, as returned to clients.
    type Entity: Serialize + DeserializeOwned + Send + Sync;
    /// Validated creation payload.
    type Create: Serialize + DeserializeOwned + Send;
    /// Typed partial update; unset fields are skipped on serialization.
    type Patch: Serialize + DeserializeOwned + Send;

    fn create_rules() -> &'static [FieldSpec];
    fn update_rules() -> &'static [FieldSpec];
}
