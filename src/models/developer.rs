use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CatalogResource;
use crate::validation::{FieldSpec, Rule};

/// A game development company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDeveloper {
    pub name: String,
}

/// Fields that can be updated for a developer.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeveloperPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CatalogResource for Developer {
    const COLLECTION: &'static str = "developers";
    const SINGULAR: &'static str = "developer";
    const TITLE: &'static str = "Developer";
    const NAME_FIELD: &'static str = "name";
    const PATCH_FIELDS: &'static str = "name";

    type Entity = Developer;
    type Create = CreateDeveloper;
    type Patch = DeveloperPatch;

    fn create_rules() -> &'static [FieldSpec] {
        &[FieldSpec { field: "name", rules: &[Rule::Required, Rule::Min(2), Rule::Max(100)] }]
    }

    fn update_rules() -> &'static [FieldSpec] {
        &[FieldSpec { field: "name", rules: &[Rule::Min(2), Rule::Max(100)] }]
    }
}
