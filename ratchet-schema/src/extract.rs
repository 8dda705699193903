//! Registration-time schema extraction from declared input types.

use serde::de::DeserializeOwned;

use crate::error::SchemaError;
use crate::schema::Schema;

/// Implemented by the single structured-input parameter type of a tool
/// handler.
///
/// The declared schema stands in for runtime reflection: it is produced once
/// at registration time and must describe the same shape the type
/// deserializes from. Required properties should match the type's
/// non-defaulted fields.
pub trait ToolInput: DeserializeOwned {
    /// Returns the schema describing this input type.
    fn schema() -> Schema;
}

/// Derives the input schema for a handler's declared parameter type.
///
/// This runs once when a tool is registered, never per call.
///
/// # Errors
///
/// Returns [`SchemaError::NotAnObject`] when the declared schema cannot
/// describe a tool argument mapping because its root is not an object.
pub fn extract<I: ToolInput>() -> Result<Schema, SchemaError> {
    let schema = I::schema();
    match &schema {
        Schema::Object(_) => Ok(schema),
        other => Err(SchemaError::NotAnObject {
            found: other.kind_label(),
        }),
    }
}
