//! The adapter wrapping one typed handler behind a uniform calling
//! convention.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use ratchet_primitives::{ResultEnvelope, ToolName};
use ratchet_schema::{Schema, ToolInput, extract};
use serde_json::{Map, Value};

use crate::error::{ToolError, ToolResult};

/// Future produced by an erased tool handler.
type HandlerFuture = Pin<Box<dyn Future<Output = ToolResult<String>> + Send>>;

type ErasedHandler = dyn Fn(Value) -> HandlerFuture + Send + Sync;

/// Immutable description of one registered tool.
#[derive(Clone, Debug)]
pub struct ToolDefinition {
    name: ToolName,
    description: String,
    input_schema: Schema,
}

impl ToolDefinition {
    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &ToolName {
        &self.name
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the input schema.
    #[must_use]
    pub fn input_schema(&self) -> &Schema {
        &self.input_schema
    }

    /// Renders the JSON Schema document advertised to the orchestrator.
    #[must_use]
    pub fn schema_value(&self) -> Value {
        self.input_schema.to_value()
    }
}

/// Outcome of one adapter invocation.
///
/// Every failure mode is a value; nothing escapes the adapter boundary as a
/// fault.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AdapterResult {
    /// The handler ran and returned its text output unmodified.
    Ok(String),
    /// The payload violated the input schema; the handler never ran.
    ValidationError(String),
    /// The handler ran and reported a domain failure.
    HandlerError(String),
}

impl AdapterResult {
    /// Returns true for a successful invocation.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Renders the wire envelope the orchestrator receives.
    #[must_use]
    pub fn envelope(&self) -> ResultEnvelope {
        match self {
            Self::Ok(text) => ResultEnvelope::success(text.clone()),
            Self::ValidationError(message) => {
                ResultEnvelope::failure(format!("Validation error: {message}"))
            }
            Self::HandlerError(message) => ResultEnvelope::failure(message.clone()),
        }
    }
}

/// Wraps one typed handler plus its schema into a uniformly callable unit.
///
/// Adapters hold no per-call state and may be invoked concurrently and
/// repeatedly.
pub struct ToolAdapter {
    definition: ToolDefinition,
    handler: Arc<ErasedHandler>,
}

impl ToolAdapter {
    /// Builds an adapter from a name, description, and typed handler.
    ///
    /// The handler declares its input by implementing [`ToolInput`]; the
    /// schema is extracted here, once, and stored alongside the handler.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidName`] for a malformed tool name and
    /// [`ToolError::Schema`] when the declared input type is not
    /// object-rooted.
    pub fn new<I, F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> ToolResult<Self>
    where
        I: ToolInput + Send + 'static,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult<String>> + Send + 'static,
    {
        let name = ToolName::new(name)?;
        let input_schema = extract::<I>()?;

        let erased: Arc<ErasedHandler> = Arc::new(move |value: Value| -> HandlerFuture {
            // The payload has already passed schema validation; a decode
            // failure here means the schema and the type disagree.
            match serde_json::from_value::<I>(value) {
                Ok(input) => Box::pin(handler(input)),
                Err(err) => Box::pin(async move {
                    Err(ToolError::execution(format!(
                        "argument decoding failed: {err}"
                    )))
                }),
            }
        });

        Ok(Self {
            definition: ToolDefinition {
                name,
                description: description.into(),
                input_schema,
            },
            handler: erased,
        })
    }

    /// Returns the immutable definition for this adapter.
    #[must_use]
    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    /// Invokes the tool with an untyped argument payload.
    ///
    /// Validation runs first and short-circuits: on any violation the handler
    /// is never called and the returned value aggregates every violated
    /// constraint. Handler failures are caught and mapped; they never
    /// propagate past this boundary.
    pub async fn invoke(&self, args: &Map<String, Value>) -> AdapterResult {
        let payload = Value::Object(args.clone());
        if let Err(violations) = self.definition.input_schema.validate(&payload) {
            let joined = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return AdapterResult::ValidationError(joined);
        }

        match (self.handler)(payload).await {
            Ok(text) => AdapterResult::Ok(text),
            Err(err) => AdapterResult::HandlerError(err.to_string()),
        }
    }
}

impl std::fmt::Debug for ToolAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolAdapter")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}
