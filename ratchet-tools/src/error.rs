//! Errors produced by tool registration and handler execution.

use ratchet_schema::SchemaError;
use thiserror::Error;

/// Result alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors produced while registering, resolving, or executing tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool or endpoint identifier failed validation.
    #[error(transparent)]
    InvalidName(#[from] ratchet_primitives::Error),

    /// The declared input type could not produce a usable schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Tool name collided with an existing registration.
    #[error("tool `{name}` is already registered")]
    DuplicateTool {
        /// Name of the offending tool.
        name: String,
    },

    /// A symbolic name did not resolve to a registered tool.
    #[error("tool `{name}` is not registered")]
    UnknownTool {
        /// Name of the missing tool.
        name: String,
    },

    /// Handler reported a domain failure.
    #[error("{reason}")]
    Execution {
        /// Human-readable error returned by the handler.
        reason: String,
    },
}

impl ToolError {
    /// Creates an execution error from the supplied reason.
    #[must_use]
    pub fn execution(reason: impl Into<String>) -> Self {
        Self::Execution {
            reason: reason.into(),
        }
    }
}
