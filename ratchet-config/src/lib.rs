//! Assembly of tools, sub-agents, and hooks into one orchestrator
//! configuration.
//!
//! The assembler is the last step of the registration pipeline: symbolic
//! names have already been resolved by the individual loaders, and what
//! remains is combining their outputs and computing the allow-list the
//! orchestrator enforces.

#![warn(missing_docs, clippy::pedantic)]

use std::collections::BTreeMap;

use ratchet_agents::AgentDefinition;
use ratchet_hooks::HookSet;
use ratchet_tools::ToolEndpoint;
use thiserror::Error;
use tracing::debug;

/// Result alias for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// Errors produced while assembling the runtime configuration.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// Two endpoints were added under the same name.
    #[error("endpoint `{name}` is already part of the configuration")]
    DuplicateEndpoint {
        /// Name of the offending endpoint.
        name: String,
    },

    /// Two agent definitions share one name.
    #[error("agent `{name}` is already part of the configuration")]
    DuplicateAgent {
        /// Name of the offending agent.
        name: String,
    },
}

/// The immutable configuration object handed to the orchestrator.
#[derive(Debug, Default)]
pub struct OrchestratorConfig {
    endpoints: BTreeMap<String, ToolEndpoint>,
    allowed_tools: Vec<String>,
    agents: BTreeMap<String, AgentDefinition>,
    hooks: HookSet,
}

impl OrchestratorConfig {
    /// Starts assembling a configuration.
    #[must_use]
    pub fn assembler() -> ConfigAssembler {
        ConfigAssembler::default()
    }

    /// Returns the endpoints keyed by name.
    #[must_use]
    pub fn endpoints(&self) -> &BTreeMap<String, ToolEndpoint> {
        &self.endpoints
    }

    /// Returns one endpoint by name.
    #[must_use]
    pub fn endpoint(&self, name: &str) -> Option<&ToolEndpoint> {
        self.endpoints.get(name)
    }

    /// Returns the complete allow-list: orchestrator-native identifiers
    /// followed by the fully-qualified identifiers of every endpoint tool,
    /// in assembly order.
    #[must_use]
    pub fn allowed_tools(&self) -> &[String] {
        &self.allowed_tools
    }

    /// Returns the sub-agent definitions keyed by name.
    #[must_use]
    pub fn agents(&self) -> &BTreeMap<String, AgentDefinition> {
        &self.agents
    }

    /// Returns the hook chains grouped by lifecycle event.
    #[must_use]
    pub fn hooks(&self) -> &HookSet {
        &self.hooks
    }
}

/// Builder combining loader outputs into an [`OrchestratorConfig`].
#[derive(Debug, Default)]
pub struct ConfigAssembler {
    endpoints: Vec<ToolEndpoint>,
    builtin_tools: Vec<String>,
    agents: Vec<AgentDefinition>,
    hooks: HookSet,
}

impl ConfigAssembler {
    /// Creates an empty assembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resolved endpoint; its capability identifiers join the
    /// allow-list.
    #[must_use]
    pub fn endpoint(mut self, endpoint: ToolEndpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Declares orchestrator-native tool identifiers to allow as-is.
    #[must_use]
    pub fn builtin_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builtin_tools.extend(tools.into_iter().map(Into::into));
        self
    }

    /// Adds one sub-agent definition.
    #[must_use]
    pub fn agent(mut self, definition: AgentDefinition) -> Self {
        self.agents.push(definition);
        self
    }

    /// Adds a batch of sub-agent definitions.
    #[must_use]
    pub fn agents<I>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = AgentDefinition>,
    {
        self.agents.extend(definitions);
        self
    }

    /// Sets the resolved hook chains.
    #[must_use]
    pub fn hooks(mut self, hooks: HookSet) -> Self {
        self.hooks = hooks;
        self
    }

    /// Finalizes the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::DuplicateEndpoint`] or
    /// [`AssemblyError::DuplicateAgent`] when names collide.
    pub fn build(self) -> AssemblyResult<OrchestratorConfig> {
        let mut allowed_tools = self.builtin_tools;
        let mut endpoints = BTreeMap::new();
        for endpoint in self.endpoints {
            let name = endpoint.name().as_str().to_owned();
            if endpoints.contains_key(&name) {
                return Err(AssemblyError::DuplicateEndpoint { name });
            }
            allowed_tools.extend(endpoint.capability_ids().into_iter().map(String::from));
            endpoints.insert(name, endpoint);
        }

        let mut agents = BTreeMap::new();
        for definition in self.agents {
            let name = definition.name().to_owned();
            if agents.contains_key(&name) {
                return Err(AssemblyError::DuplicateAgent { name });
            }
            agents.insert(name, definition);
        }

        debug!(
            endpoints = endpoints.len(),
            allowed = allowed_tools.len(),
            agents = agents.len(),
            "assembled orchestrator configuration"
        );

        Ok(OrchestratorConfig {
            endpoints,
            allowed_tools,
            agents,
            hooks: self.hooks,
        })
    }
}
