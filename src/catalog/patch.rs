//! Partial-update normalization.
//!
//! Update payloads deserialize into typed patch structs whose fields are
//! all optional and skipped on serialization when unset. Serializing the
//! patch therefore yields exactly the explicitly-supplied fields, which
//! become the storage-level merge document.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatchError {
    /// The patch supplied no fields; callers must not reach storage with a
    /// no-op merge.
    #[error("at least one field must be provided for update")]
    Empty,

    #[error("patch serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reduce a typed patch to its explicit fields and stamp the refreshed
/// `updatedAt`. Fails with [`PatchError::Empty`] when no field was set.
pub fn build_patch<P: Serialize>(
    patch: &P,
    now: DateTime<Utc>,
) -> Result<Map<String, Value>, PatchError> {
    let mut fields = match serde_json::to_value(patch)? {
        Value::Object(fields) => fields,
        other => {
            return Err(PatchError::Serialization(serde::ser::Error::custom(format!(
                "patch must serialize to an object, got {}",
                other
            ))))
        }
    };

    if fields.is_empty() {
        return Err(PatchError::Empty);
    }

    fields.insert("updatedAt".to_string(), json!(now));
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Default, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct TestPatch {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        manufacturer: Option<String>,
    }

    #[test]
    fn empty_patch_is_rejected() {
        let err = build_patch(&TestPatch::default(), Utc::now()).unwrap_err();
        assert!(matches!(err, PatchError::Empty));
    }

    #[test]
    fn only_explicit_fields_survive() {
        let patch = TestPatch { name: Some("Switch".to_string()), manufacturer: None };
        let fields = build_patch(&patch, Utc::now()).unwrap();

        assert_eq!(fields.get("name"), Some(&serde_json::json!("Switch")));
        assert!(!fields.contains_key("manufacturer"));
    }

    #[test]
    fn updated_at_is_always_stamped() {
        let now = Utc::now();
        let patch = TestPatch { name: Some("Switch".to_string()), manufacturer: None };
        let fields = build_patch(&patch, now).unwrap();

        assert_eq!(fields.get("updatedAt"), Some(&serde_json::json!(now)));
        assert_eq!(fields.len(), 2);
    }
}
