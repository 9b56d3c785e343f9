//! JSON Schema well-formedness check.

use serde_json::Value;

use crate::error::FlattenError;

/// Check that `schema` compiles as a JSON Schema.
///
/// This catches malformed keyword values (an unknown `type` name, a
/// negative `minLength`) that the flattener would otherwise carry into the
/// inventory unchanged.
///
/// # Errors
///
/// Returns `FlattenError::InvalidSchema` with the compiler's message.
pub fn check_schema(schema: &Value) -> Result<(), FlattenError> {
    jsonschema::validator_for(schema)
        .map(|_| ())
        .map_err(|e| FlattenError::InvalidSchema {
            message: e.to_string(),
        })
}
