use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::CatalogResource;
use crate::validation::{FieldSpec, Rule};

/// A video game. Platform, genre, developer, and publisher references are
/// opaque keys into their collections; dangling references are allowed and
/// never validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub release_date: DateTime<Utc>,
    pub platforms: Vec<Uuid>,
    pub genres: Vec<Uuid>,
    pub developers: Vec<Uuid>,
    pub publishers: Vec<Uuid>,
    pub cover_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metacritic_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGame {
    pub title: String,
    pub description: String,
    pub release_date: DateTime<Utc>,
    pub platforms: Vec<Uuid>,
    pub genres: Vec<Uuid>,
    pub developers: Vec<Uuid>,
    pub publishers: Vec<Uuid>,
    pub cover_image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metacritic_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_score: Option<f64>,
}

/// Fields that can be updated for a game. The cover image is set at
/// creation and not patchable.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developers: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publishers: Option<Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metacritic_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_score: Option<f64>,
}

impl CatalogResource for Game {
    const COLLECTION: &'static str = "games";
    const SINGULAR: &'static str = "game";
    const TITLE: &'static str = "Game";
    const NAME_FIELD: &'static str = "title";
    const PATCH_FIELDS: &'static str = "title, description, releaseDate, platforms, genres, \
                                        developers, publishers, metacriticScore or usersScore";

    type Entity = Game;
    type Create = CreateGame;
    type Patch = GamePatch;

    fn create_rules() -> &'static [FieldSpec] {
        &[
            FieldSpec { field: "title", rules: &[Rule::Required, Rule::Min(1), Rule::Max(100)] },
            FieldSpec { field: "description", rules: &[Rule::Required, Rule::Min(1)] },
            FieldSpec { field: "releaseDate", rules: &[Rule::Required] },
            FieldSpec { field: "platforms", rules: &[Rule::Required, Rule::Min(1)] },
            FieldSpec { field: "genres", rules: &[Rule::Required, Rule::Min(1)] },
            FieldSpec { field: "developers", rules: &[Rule::Required, Rule::Min(1)] },
            FieldSpec { field: "publishers", rules: &[Rule::Required, Rule::Min(1)] },
            FieldSpec { field: "coverImage", rules: &[Rule::Required] },
            FieldSpec { field: "metacriticScore", rules: &[Rule::Min(0), Rule::Max(100)] },
            FieldSpec { field: "usersScore", rules: &[Rule::Min(0), Rule::Max(100)] },
        ]
    }

    fn update_rules() -> &'static [FieldSpec] {
        &[
            FieldSpec { field: "title", rules: &[Rule::Min(1), Rule::Max(100)] },
            FieldSpec { field: "description", rules: &[Rule::Min(1)] },
            FieldSpec { field: "platforms", rules: &[Rule::Min(1)] },
            FieldSpec { field: "genres", rules: &[Rule::Min(1)] },
            FieldSpec { field: "developers", rules: &[Rule::Min(1)] },
            FieldSpec { field: "publishers", rules: &[Rule::Min(1)] },
            FieldSpec { field: "metacriticScore", rules: &[Rule::Min(0), Rule::Max(100)] },
            FieldSpec { field: "usersScore", rules: &[Rule::Min(0), Rule::Max(100)] },
        ]
    }
}
