//! Tool adapters, registry, and endpoint assembly.
//!
//! An adapter is the sole boundary between untyped call arguments and a
//! strongly-typed handler: it validates, invokes, and normalizes. The
//! registry resolves symbolic names into adapters and bundles them behind
//! named endpoints with allow-list identifiers.

#![warn(missing_docs, clippy::pedantic)]

mod adapter;
mod error;
mod registry;

pub use adapter::{AdapterResult, ToolAdapter, ToolDefinition};
pub use error::{ToolError, ToolResult};
pub use registry::{ToolEndpoint, ToolRegistry};
