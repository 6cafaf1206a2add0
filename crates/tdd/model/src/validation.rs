//! Minimum validity of a Thing Description

use crate::error::{ModelError, ModelResult};
use crate::{fields, ThingDescription};
use serde_json::Value;

/// Check the directory's minimum schema: a non-empty string `title`.
pub fn validate_minimum(td: &ThingDescription) -> ModelResult<()> {
    match td.get(fields::TITLE) {
        None | Some(Value::Null) => Err(ModelError::MissingTitle),
        Some(Value::String(title)) if !title.is_empty() => Ok(()),
        Some(other) => Err(ModelError::InvalidTitle(other.to_string())),
    }
}

/// Interpret a JSON value as a TD, then check minimum validity.
pub fn validate_value(value: &Value) -> ModelResult<&ThingDescription> {
    let td = value
        .as_object()
        .ok_or_else(|| ModelError::NotAnObject(value.to_string()))?;
    validate_minimum(td)?;
    Ok(td)
}
