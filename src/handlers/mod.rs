pub mod auth;
pub mod catalog;
pub mod health;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::validation::{validate, FieldSpec};

/// Decode a JSON request body, run the declared validation rules against
/// it, then deserialize into the typed request. Malformed or non-object
/// bodies are a generic 400; rule failures carry field detail.
pub(crate) fn decode_body<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
    specs: &[FieldSpec],
) -> Result<T, ApiError> {
    let Json(value) = payload.map_err(|_| ApiError::bad_request("Invalid request body"))?;

    let Value::Object(ref fields) = value else {
        return Err(ApiError::bad_request("Invalid request body"));
    };

    validate(fields, specs)
        .map_err(|errors| ApiError::validation_error("Validation failed", errors))?;

    serde_json::from_value(value).map_err(|_| ApiError::bad_request("Invalid request body"))
}
