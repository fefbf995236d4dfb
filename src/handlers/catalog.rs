//! Generic HTTP handlers for the catalog resources.
//!
//! One handler set serves all five entity types; the resource descriptor
//! supplies collection names, search fields, validation rules, and the
//! nouns used in response messages.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use std::collections::HashMap;

use super::decode_body;
use crate::catalog::service::ServiceError;
use crate::catalog::CatalogResource;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/{resource} — list all, or filter by name substring.
pub async fn list<R: CatalogResource>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<R::Entity>>, ApiError> {
    let name = params.get(R::NAME_FIELD).map(String::as_str);
    if let Some(name) = name.filter(|s| !s.is_empty()) {
        tracing::info!("searching {} matching {:?}", R::COLLECTION, name);
    }

    let entities = state
        .service::<R>()
        .get_all(name)
        .await
        .map_err(|e| storage_failure(e, &format!("fetch {}", R::COLLECTION)))?;

    tracing::info!("retrieved {} {}", entities.len(), R::COLLECTION);
    Ok(Json(entities))
}

/// GET /api/{resource}/:id
pub async fn get<R: CatalogResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<R::Entity>, ApiError> {
    let entity = state
        .service::<R>()
        .get_by_id(&id)
        .await
        .map_err(|e| map_error::<R>(e, "fetch"))?;
    Ok(Json(entity))
}

/// POST /api/{resource}
pub async fn create<R: CatalogResource>(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<R::Entity>), ApiError> {
    let input: R::Create = decode_body(payload, R::create_rules())?;

    let entity = state
        .service::<R>()
        .create(input)
        .await
        .map_err(|e| map_error::<R>(e, "create"))?;

    tracing::info!("created {}", R::SINGULAR);
    Ok((StatusCode::CREATED, Json(entity)))
}

/// PUT /api/{resource}/:id — partial update, returns the updated entity.
pub async fn update<R: CatalogResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<R::Entity>, ApiError> {
    let patch: R::Patch = decode_body(payload, R::update_rules())?;

    let entity = state
        .service::<R>()
        .update(&id, patch)
        .await
        .map_err(|e| map_error::<R>(e, "update"))?;

    tracing::info!("updated {} {}", R::SINGULAR, id);
    Ok(Json(entity))
}

/// DELETE /api/{resource}/:id — returns the deleted entity.
pub async fn remove<R: CatalogResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<R::Entity>, ApiError> {
    let entity = state
        .service::<R>()
        .delete(&id)
        .await
        .map_err(|e| map_error::<R>(e, "delete"))?;

    tracing::info!("deleted {} {}", R::SINGULAR, id);
    Ok(Json(entity))
}

/// Resolve service sentinels to client responses; anything else is a
/// storage failure reported generically.
fn map_error<R: CatalogResource>(err: ServiceError, action: &str) -> ApiError {
    match err {
        ServiceError::InvalidId => ApiError::bad_request(format!("Invalid {} ID", R::SINGULAR)),
        ServiceError::NotFound => ApiError::not_found(format!("{} not found", R::TITLE)),
        ServiceError::NoUpdateData => ApiError::bad_request(format!(
            "At least one field ({}) must be provided for update",
            R::PATCH_FIELDS
        )),
        other => storage_failure(other, &format!("{} {}", action, R::SINGULAR)),
    }
}

fn storage_failure(err: ServiceError, operation: &str) -> ApiError {
    tracing::error!("failed to {}: {}", operation, err);
    ApiError::internal_server_error(format!("Failed to {}", operation))
}
