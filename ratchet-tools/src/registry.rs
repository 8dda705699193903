//! Registry resolving symbolic tool names into adapters and endpoints.

use std::collections::HashMap;
use std::sync::Arc;

use ratchet_primitives::{EndpointName, QualifiedToolId};
use serde_json::{Map, Value};
use tracing::debug;

use crate::adapter::{AdapterResult, ToolAdapter, ToolDefinition};
use crate::error::{ToolError, ToolResult};

/// Registry storing tool adapters keyed by name.
///
/// Populated once at configuration time, then shared read-only.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<ToolAdapter>>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter under its definition name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::DuplicateTool`] if the name is already present.
    pub fn register(&mut self, adapter: ToolAdapter) -> ToolResult<()> {
        let name = adapter.definition().name().as_str().to_owned();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateTool { name });
        }
        debug!(tool = %name, "registered tool");
        self.tools.insert(name, Arc::new(adapter));
        Ok(())
    }

    /// Returns the adapter registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<ToolAdapter>> {
        self.tools.get(name).cloned()
    }

    /// Returns the definitions of all registered tools.
    #[must_use]
    pub fn definitions(&self) -> Vec<&ToolDefinition> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true when no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Resolves an ordered list of symbolic names into a named endpoint.
    ///
    /// Resolution fails fast at assembly time, before the orchestrator
    /// starts, never at call time.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] for the first unresolvable name and
    /// propagates [`ToolError::InvalidName`] for a malformed endpoint name.
    pub fn endpoint(&self, name: impl Into<String>, tool_names: &[&str]) -> ToolResult<ToolEndpoint> {
        let name = EndpointName::new(name)?;
        let mut tools = Vec::with_capacity(tool_names.len());
        for tool_name in tool_names {
            let adapter = self.get(tool_name).ok_or_else(|| ToolError::UnknownTool {
                name: (*tool_name).to_owned(),
            })?;
            tools.push(adapter);
        }
        debug!(endpoint = %name, tools = tools.len(), "assembled endpoint");
        Ok(ToolEndpoint { name, tools })
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.tools.keys().cloned().collect();
        f.debug_struct("ToolRegistry")
            .field("registered", &names)
            .finish()
    }
}

/// A named bundle of resolved adapters exposed to the orchestrator as one
/// addressable group.
#[derive(Clone)]
pub struct ToolEndpoint {
    name: EndpointName,
    tools: Vec<Arc<ToolAdapter>>,
}

impl ToolEndpoint {
    /// Returns the endpoint name.
    #[must_use]
    pub fn name(&self) -> &EndpointName {
        &self.name
    }

    /// Returns the bundled adapters in resolution order.
    #[must_use]
    pub fn tools(&self) -> &[Arc<ToolAdapter>] {
        &self.tools
    }

    /// Returns the fully-qualified identifiers the orchestrator's allow-list
    /// must contain, in one-to-one order with the bundled tools.
    #[must_use]
    pub fn capability_ids(&self) -> Vec<QualifiedToolId> {
        self.tools
            .iter()
            .map(|tool| QualifiedToolId::new(&self.name, tool.definition().name()))
            .collect()
    }

    /// Returns the adapter for a bundled tool by its unqualified name.
    #[must_use]
    pub fn get(&self, tool_name: &str) -> Option<&Arc<ToolAdapter>> {
        self.tools
            .iter()
            .find(|tool| tool.definition().name().as_str() == tool_name)
    }

    /// Dispatches a call to a bundled tool by its unqualified name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] when the endpoint does not bundle a
    /// tool by that name. Handler and validation failures are reported inside
    /// the returned [`AdapterResult`], not as errors.
    pub async fn invoke(
        &self,
        tool_name: &str,
        args: &Map<String, Value>,
    ) -> ToolResult<AdapterResult> {
        let adapter = self.get(tool_name).ok_or_else(|| ToolError::UnknownTool {
            name: tool_name.to_owned(),
        })?;
        Ok(adapter.invoke(args).await)
    }
}

impl std::fmt::Debug for ToolEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self
            .tools
            .iter()
            .map(|tool| tool.definition().name().as_str().to_owned())
            .collect();
        f.debug_struct("ToolEndpoint")
            .field("name", &self.name)
            .field("tools", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ratchet_schema::{ObjectSchema, Schema, StringSchema, ToolInput};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct EchoInput {
        message: String,
    }

    impl ToolInput for EchoInput {
        fn schema() -> Schema {
            ObjectSchema::new()
                .required("message", StringSchema::new())
                .into()
        }
    }

    fn echo_adapter(name: &str) -> ToolAdapter {
        ToolAdapter::new(name, "Echoes its input", |input: EchoInput| async move {
            Ok(input.message)
        })
        .expect("adapter")
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(echo_adapter("alpha")).unwrap();
        registry.register(echo_adapter("beta")).unwrap();
        registry
    }

    #[test]
    fn duplicate_registration_errors() {
        let mut registry = registry();
        let err = registry
            .register(echo_adapter("alpha"))
            .expect_err("duplicate should fail");
        assert!(matches!(err, ToolError::DuplicateTool { name } if name == "alpha"));
    }

    #[test]
    fn unknown_name_fails_at_assembly_time() {
        let registry = registry();
        let err = registry
            .endpoint("custom", &["alpha", "missing"])
            .expect_err("unknown tool should fail");
        assert!(matches!(err, ToolError::UnknownTool { name } if name == "missing"));
    }

    #[test]
    fn capability_ids_preserve_input_order() {
        let registry = registry();
        let endpoint = registry.endpoint("custom", &["beta", "alpha"]).unwrap();
        let ids: Vec<String> = endpoint
            .capability_ids()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(ids, ["custom__beta", "custom__alpha"]);
    }

    #[test]
    fn repeated_resolution_is_stable() {
        let registry = registry();
        let first = registry.endpoint("custom", &["alpha", "beta"]).unwrap();
        let second = registry.endpoint("custom", &["alpha", "beta"]).unwrap();
        assert_eq!(first.capability_ids(), second.capability_ids());
    }

    #[tokio::test]
    async fn endpoint_dispatches_by_unqualified_name() {
        let registry = registry();
        let endpoint = registry.endpoint("custom", &["alpha"]).unwrap();

        let args = match json!({"message": "hello"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let result = endpoint.invoke("alpha", &args).await.unwrap();
        assert_eq!(result, AdapterResult::Ok("hello".into()));

        let err = endpoint.invoke("gamma", &args).await.expect_err("miss");
        assert!(matches!(err, ToolError::UnknownTool { name } if name == "gamma"));
    }
}
