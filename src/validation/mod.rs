//! Declarative request validation.
//!
//! Rules are declared per resource as static `FieldSpec` tables and applied
//! to the decoded JSON payload before it is deserialized into a typed
//! request. Failures are collected per field, in declaration order, and
//! never short-circuit, so a response reports every invalid field at once.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// A single field constraint.
///
/// `Min`/`Max` follow the original validator semantics: character count for
/// strings, element count for arrays, value for numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    Min(i64),
    Max(i64),
    OneOf(&'static [&'static str]),
    Email,
}

/// Constraints for one payload field, keyed by its JSON name.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

/// A field-level validation failure, serialized into the error envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validate a decoded payload against the declared field constraints.
///
/// Absent or null fields only trip `Required`; the remaining rules apply to
/// supplied values, which is what makes the same tables usable for both
/// create payloads (with `Required`) and partial updates (without).
pub fn validate(payload: &Map<String, Value>, specs: &[FieldSpec]) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    for spec in specs {
        let value = payload.get(spec.field);
        for rule in spec.rules {
            if let Some(message) = check(value, rule) {
                errors.push(FieldError { field: spec.field.to_string(), message });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check(value: Option<&Value>, rule: &Rule) -> Option<String> {
    let present = match value {
        None | Some(Value::Null) => false,
        Some(_) => true,
    };

    if let Rule::Required = rule {
        let empty_string = matches!(value, Some(Value::String(s)) if s.is_empty());
        if !present || empty_string {
            return Some(message_for(rule));
        }
        return None;
    }

    // All other rules only apply to supplied values
    let value = match value {
        None | Some(Value::Null) => return None,
        Some(v) => v,
    };

    let ok = match rule {
        Rule::Required => unreachable!(),
        Rule::Min(n) => match value {
            Value::String(s) => s.chars().count() as i64 >= *n,
            Value::Array(items) => items.len() as i64 >= *n,
            Value::Number(v) => v.as_f64().map_or(false, |v| v >= *n as f64),
            _ => true,
        },
        Rule::Max(n) => match value {
            Value::String(s) => s.chars().count() as i64 <= *n,
            Value::Array(items) => items.len() as i64 <= *n,
            Value::Number(v) => v.as_f64().map_or(false, |v| v <= *n as f64),
            _ => true,
        },
        Rule::OneOf(allowed) => match value {
            Value::String(s) => allowed.contains(&s.as_str()),
            _ => false,
        },
        Rule::Email => match value {
            Value::String(s) => EMAIL_RE.is_match(s),
            _ => false,
        },
    };

    if ok {
        None
    } else {
        Some(match rule {
            Rule::Min(_) | Rule::Max(_) if !matches!(value, Value::String(_)) => {
                non_string_bound_message(rule)
            }
            _ => message_for(rule),
        })
    }
}

/// User-facing message for a failed rule. Rules without a specific message
/// fall back to "Invalid value".
fn message_for(rule: &Rule) -> String {
    match rule {
        Rule::Required => "This field is required".to_string(),
        Rule::Min(n) => format!("Must be at least {} characters long", n),
        Rule::Max(n) => format!("Must not exceed {} characters", n),
        Rule::OneOf(allowed) => format!("Must be one of: {}", allowed.join(", ")),
        _ => "Invalid value".to_string(),
    }
}

fn non_string_bound_message(rule: &Rule) -> String {
    match rule {
        Rule::Min(n) => format!("Must be at least {}", n),
        Rule::Max(n) => format!("Must not exceed {}", n),
        _ => "Invalid value".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    const NAME_RULES: &[FieldSpec] = &[FieldSpec {
        field: "name",
        rules: &[Rule::Required, Rule::Min(2), Rule::Max(50)],
    }];

    #[test]
    fn missing_required_field() {
        let errors = validate(&payload(json!({})), NAME_RULES).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].message, "This field is required");
    }

    #[test]
    fn empty_string_fails_required() {
        let errors = validate(&payload(json!({"name": ""})), NAME_RULES).unwrap_err();
        assert!(errors.iter().any(|e| e.message == "This field is required"));
    }

    #[test]
    fn string_length_bounds() {
        let errors = validate(&payload(json!({"name": "x"})), NAME_RULES).unwrap_err();
        assert_eq!(errors[0].message, "Must be at least 2 characters long");

        let long = "x".repeat(51);
        let errors = validate(&payload(json!({"name": long})), NAME_RULES).unwrap_err();
        assert_eq!(errors[0].message, "Must not exceed 50 characters");

        assert!(validate(&payload(json!({"name": "PlayStation"})), NAME_RULES).is_ok());
    }

    #[test]
    fn numeric_bounds_use_value_not_length() {
        const SCORE: &[FieldSpec] = &[FieldSpec {
            field: "metacriticScore",
            rules: &[Rule::Min(0), Rule::Max(100)],
        }];
        let errors = validate(&payload(json!({"metacriticScore": 101})), SCORE).unwrap_err();
        assert_eq!(errors[0].message, "Must not exceed 100");
        assert!(validate(&payload(json!({"metacriticScore": 87.5})), SCORE).is_ok());
    }

    #[test]
    fn array_bounds_use_element_count() {
        const PLATFORMS: &[FieldSpec] = &[FieldSpec {
            field: "platforms",
            rules: &[Rule::Required, Rule::Min(1)],
        }];
        let errors = validate(&payload(json!({"platforms": []})), PLATFORMS).unwrap_err();
        assert_eq!(errors[0].message, "Must be at least 1");
    }

    #[test]
    fn optional_fields_skip_rules_when_absent() {
        const UPDATE: &[FieldSpec] = &[FieldSpec {
            field: "name",
            rules: &[Rule::Min(2), Rule::Max(50)],
        }];
        assert!(validate(&payload(json!({})), UPDATE).is_ok());
        assert!(validate(&payload(json!({"name": null})), UPDATE).is_ok());
        assert!(validate(&payload(json!({"name": "x"})), UPDATE).is_err());
    }

    #[test]
    fn one_of_membership() {
        const KIND: &[FieldSpec] = &[FieldSpec {
            field: "kind",
            rules: &[Rule::OneOf(&["console", "handheld"])],
        }];
        let errors = validate(&payload(json!({"kind": "toaster"})), KIND).unwrap_err();
        assert_eq!(errors[0].message, "Must be one of: console, handheld");
        assert!(validate(&payload(json!({"kind": "handheld"})), KIND).is_ok());
    }

    #[test]
    fn email_format_falls_back_to_generic_message() {
        const EMAIL: &[FieldSpec] = &[FieldSpec {
            field: "email",
            rules: &[Rule::Required, Rule::Email],
        }];
        let errors = validate(&payload(json!({"email": "not-an-email"})), EMAIL).unwrap_err();
        assert_eq!(errors[0].message, "Invalid value");
        assert!(validate(&payload(json!({"email": "sam@example.com"})), EMAIL).is_ok());
    }

    #[test]
    fn multiple_fields_reported_together() {
        const SPECS: &[FieldSpec] = &[
            FieldSpec { field: "name", rules: &[Rule::Required, Rule::Min(2)] },
            FieldSpec { field: "manufacturer", rules: &[Rule::Required] },
        ];
        let errors = validate(&payload(json!({"name": "x"})), SPECS).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[1].field, "manufacturer");
    }
}
