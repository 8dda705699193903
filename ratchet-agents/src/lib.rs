//! Sub-agent definitions and the loaders that resolve them.
//!
//! A sub-agent is a named, pre-configured delegate with its own restricted
//! tool set and instructions. Definitions come from either an in-process
//! library of pre-built records or a directory of markdown documents with a
//! metadata block.

#![warn(missing_docs, clippy::pedantic)]

mod definition;
mod error;
mod library;
mod loader;

pub use definition::{AgentDefinition, AgentDefinitionBuilder, ModelSelector};
pub use error::{AgentError, AgentResult};
pub use library::AgentLibrary;
pub use loader::{DOCUMENT_DELIMITER, DirectoryLoad, LoadFailure, load_from_dir, parse_document};
