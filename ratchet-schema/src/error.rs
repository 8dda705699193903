//! Errors raised while deriving a schema from a tool input type.

use thiserror::Error;

/// Errors produced by schema extraction at registration time.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The input type declared a schema whose root is not an object.
    ///
    /// Tool arguments arrive as a mapping of field names to values, so only
    /// object-rooted schemas are usable as tool inputs.
    #[error("tool input schema must be a top-level object, found {found}")]
    NotAnObject {
        /// Type label of the offending schema root.
        found: &'static str,
    },
}
