use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CatalogResource;
use crate::validation::{FieldSpec, Rule};

/// A gaming platform (e.g., PlayStation, Xbox).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: Uuid,
    pub name: String,
    pub manufacturer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlatform {
    pub name: String,
    pub manufacturer: String,
}

/// Fields that can be updated for a platform.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

impl CatalogResource for Platform {
    const COLLECTION: &'static str = "platforms";
    const SINGULAR: &'static str = "platform";
    const TITLE: &'static str = "Platform";
    const NAME_FIELD: &'static str = "name";
    const PATCH_FIELDS: &'static str = "name or manufacturer";

    type Entity = Platform;
    type Create = CreatePlatform;
    type Patch = PlatformPatch;

    fn create_rules() -> &'static [FieldSpec] {
        &[
            FieldSpec { field: "name", rules: &[Rule::Required, Rule::Min(2), Rule::Max(50)] },
            FieldSpec {
                field: "manufacturer",
                rules: &[Rule::Required, Rule::Min(2), Rule::Max(50)],
            },
        ]
    }

    fn update_rules() -> &'static [FieldSpec] {
        &[
            FieldSpec { field: "name", rules: &[Rule::Min(2), Rule::Max(50)] },
            FieldSpec { field: "manufacturer", rules: &[Rule::Min(2), Rule::Max(50)] },
        ]
    }
}
