//! Explicit schema descriptions for tool input types.
//!
//! A [`Schema`] is built once when a handler is registered and stored next to
//! it; no reflection happens per call. The same value drives both the JSON
//! Schema document advertised to the orchestrator and the validation pass run
//! before a handler is invoked.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod extract;
mod schema;
mod validate;

pub use error::SchemaError;
pub use extract::{ToolInput, extract};
pub use schema::{
    ArraySchema, BooleanSchema, IntegerSchema, NumberSchema, ObjectSchema, Schema, StringSchema,
};
pub use validate::Violation;
