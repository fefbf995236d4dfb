use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{FieldSpec, Rule};

pub const USERS_COLLECTION: &str = "users";

/// A registered account. The password field holds the bcrypt hash and is
/// never serialized into a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub const REGISTER_RULES: &[FieldSpec] = &[
    FieldSpec { field: "username", rules: &[Rule::Required, Rule::Min(3), Rule::Max(32)] },
    FieldSpec { field: "email", rules: &[Rule::Required, Rule::Email] },
    FieldSpec { field: "password", rules: &[Rule::Required, Rule::Min(8)] },
];

pub const LOGIN_RULES: &[FieldSpec] = &[
    FieldSpec { field: "email", rules: &[Rule::Required, Rule::Email] },
    FieldSpec { field: "password", rules: &[Rule::Required] },
];
