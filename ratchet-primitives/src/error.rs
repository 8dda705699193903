//! Shared error definitions for framework primitives.

use thiserror::Error;

/// Result alias used throughout the framework primitives.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// Tool identifier failed validation.
    #[error("invalid tool name `{name}`: {reason}")]
    InvalidToolName {
        /// The offending identifier string.
        name: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Endpoint identifier failed validation.
    #[error("invalid endpoint name `{name}`: {reason}")]
    InvalidEndpointName {
        /// The offending identifier string.
        name: String,
        /// Human-readable reason for rejection.
        reason: String,
    },
}
