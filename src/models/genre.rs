use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CatalogResource;
use crate::validation::{FieldSpec, Rule};

/// A game genre (e.g., RPG, platformer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGenre {
    pub name: String,
}

/// Fields that can be updated for a genre.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenrePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CatalogResource for Genre {
    const COLLECTION: &'static str = "genres";
    const SINGULAR: &'static str = "genre";
    const TITLE: &'static str = "Genre";
    const NAME_FIELD: &'static str = "name";
    const PATCH_FIELDS: &'static str = "name";

    type Entity = Genre;
    type Create = CreateGenre;
    type Patch = GenrePatch;

    fn create_rules() -> &'static [FieldSpec] {
        &[FieldSpec { field: "name", rules: &[Rule::Required, Rule::Min(2), Rule::Max(50)] }]
    }

    fn update_rules() -> &'static [FieldSpec] {
        &[FieldSpec { field: "name", rules: &[Rule::Min(2), Rule::Max(50)] }]
    }
}
