//! Errors raised while constructing or loading agent definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors produced by agent definition construction and loading.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Definition fields failed validation.
    #[error("invalid agent definition: {reason}")]
    InvalidDefinition {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// A symbolic name did not resolve against the library.
    #[error("agent `{name}` is not in the library")]
    UnknownAgent {
        /// Name of the missing agent.
        name: String,
    },

    /// A definition document could not be parsed.
    #[error("malformed agent document `{source_name}`: {reason}")]
    Document {
        /// Identifies the offending document (file name or caller label).
        source_name: String,
        /// Human-readable reason the document was rejected.
        reason: String,
    },

    /// A directory or file could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
}
