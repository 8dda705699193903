//! Core shared types for the ratchet registration and dispatch framework.

#![warn(missing_docs, clippy::pedantic)]

mod envelope;
mod error;
mod name;

/// Uniform result envelope returned to the orchestrator for every tool call.
pub use envelope::{ContentBlock, ResultEnvelope};
/// Error type and result alias shared across the framework.
pub use error::{Error, Result};
/// Validated identifiers for tools, endpoints, and allow-list entries.
pub use name::{EndpointName, QualifiedToolId, ToolName};
