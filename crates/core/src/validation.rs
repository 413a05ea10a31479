//! Input validation for job identity, parameters, and enqueued task ids.
//!
//! Pure functions shared by the job crate and the command-line front end.

use serde_json::Value;

use crate::error::CoreError;
use crate::types::ParamMap;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Validate a job uid.
///
/// The uid is stored verbatim, so only emptiness is rejected. Surrounding
/// whitespace is not trimmed.
pub fn validate_uid(uid: &str) -> Result<(), CoreError> {
    if uid.is_empty() {
        return Err(CoreError::Validation(
            "Job uid must be a non-empty string".to_string(),
        ));
    }
    Ok(())
}

/// Validate a task id passed to `enqueue`.
pub fn validate_task_id(task_id: &str) -> Result<(), CoreError> {
    if task_id.is_empty() {
        return Err(CoreError::Validation(
            "Enqueued task id must be a non-empty string".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Require `value` to be a JSON object and return its entries.
///
/// Arrays and scalars are rejected. The message names the offending JSON
/// kind so callers can tell `[1, 2]` apart from `"text"`.
pub fn require_params_object(value: Value) -> Result<ParamMap, CoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::Validation(format!(
            "Params must be an object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
