//! Structural validation of argument bags against a declared schema.
//!
//! The validator is strict on required and typed data and permissive on
//! excess: fields a tool never declared pass through to the backend
//! unchanged. Declared defaults are filled in for absent optional fields, so
//! capabilities can rely on them being present.

use serde_json::{Map, Value};
use thiserror::Error;

use super::schema::{FieldKind, FieldSpec, Schema};

/// Validation failure identifying the first offending field.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Check `args` against `schema`, filling in declared defaults.
///
/// Stops at the first offending field; the argument bag may be partially
/// defaulted on failure, but a failed validation never reaches a capability
/// so the partial state is discarded with the call.
pub fn validate(schema: &Schema, args: &mut Map<String, Value>) -> Result<(), ValidationError> {
    check_object(schema, args, "")
}

fn check_object(
    schema: &Schema,
    object: &mut Map<String, Value>,
    path: &str,
) -> Result<(), ValidationError> {
    for name in schema.required_fields() {
        match object.get(name) {
            None => {
                return Err(ValidationError::new(format!(
                    "missing required field `{}`",
                    join(path, name)
                )));
            }
            Some(Value::Null) => {
                return Err(ValidationError::new(format!(
                    "required field `{}` is null",
                    join(path, name)
                )));
            }
            Some(_) => {}
        }
    }

    for (name, spec) in schema.fields() {
        if object.contains_key(name) {
            if let Some(value) = object.get_mut(name) {
                check_value(spec, value, &join(path, name))?;
            }
        } else if let Some(default) = spec.default() {
            if !schema.is_required(name) {
                object.insert(name.clone(), default.clone());
            }
        }
    }

    // Fields present in the bag but not declared are deliberately ignored:
    // they are passed through to the backend as-is.
    Ok(())
}

fn check_value(spec: &FieldSpec, value: &mut Value, path: &str) -> Result<(), ValidationError> {
    match spec.kind() {
        FieldKind::String if value.is_string() => Ok(()),
        FieldKind::Number if value.is_number() => Ok(()),
        FieldKind::Boolean if value.is_boolean() => Ok(()),
        FieldKind::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.iter().any(|a| a == s) => Ok(()),
            Some(s) => Err(ValidationError::new(format!(
                "field `{path}`: expected one of [{}], got \"{s}\"",
                allowed.join(", ")
            ))),
            None => Err(mismatch(spec, value, path)),
        },
        FieldKind::Array(item) => match value.as_array_mut() {
            Some(elements) => {
                for (i, element) in elements.iter_mut().enumerate() {
                    check_value(item, element, &format!("{path}[{i}]"))?;
                }
                Ok(())
            }
            None => Err(mismatch(spec, value, path)),
        },
        FieldKind::Object(nested) => match value.as_object_mut() {
            Some(object) => check_object(nested, object, path),
            None => Err(mismatch(spec, value, path)),
        },
        _ => Err(mismatch(spec, value, path)),
    }
}

fn mismatch(spec: &FieldSpec, value: &Value, path: &str) -> ValidationError {
    ValidationError::new(format!(
        "field `{path}`: expected {}, got {}",
        spec.kind_name(),
        json_type_name(value)
    ))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}
