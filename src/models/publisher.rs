use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CatalogResource;
use crate::validation::{FieldSpec, Rule};

/// A video game publisher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePublisher {
    pub name: String,
}

/// Fields that can be updated for a publisher.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PublisherPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CatalogResource for Publisher {
    const COLLECTION: &'static str = "publishers";
    const SINGULAR: &'static str = "publisher";
    const TITLE: &'static str = "Publisher";
    const NAME_FIELD: &'static str = "name";
    const PATCH_FIELDS: &'static str = "name";

    type Entity = Publisher;
    type Create = CreatePublisher;
    type Patch = PublisherPatch;

    fn create_rules() -> &'static [FieldSpec] {
        &[FieldSpec { field: "name", rules: &[Rule::Required, Rule::Min(2), Rule::Max(100)] }]
    }

    fn update_rules() -> &'static [FieldSpec] {
        &[FieldSpec { field: "name", rules: &[Rule::Min(2), Rule::Max(100)] }]
    }
}
