//! The declarative record describing one sub-agent.

use std::collections::BTreeSet;
use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, AgentResult};

/// Which model a sub-agent runs on.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ModelSelector {
    /// A concrete model alias (e.g. `sonnet`, `haiku`).
    Named(String),
    /// Inherit whatever model the parent session uses.
    Inherit,
    /// Leave the choice to the orchestrator.
    #[default]
    Unspecified,
}

impl ModelSelector {
    /// Parses the textual form used in definition documents.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == "inherit" {
            Self::Inherit
        } else {
            Self::Named(value.to_string())
        }
    }

    /// Returns the textual form, `None` when unspecified.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Inherit => Some("inherit"),
            Self::Unspecified => None,
        }
    }

    /// Returns true when no model was selected.
    #[must_use]
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

impl fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("unspecified"))
    }
}

impl Serialize for ModelSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for ModelSelector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map_or(Self::Unspecified, Self::parse))
    }
}

/// Immutable description of one sub-agent, consumed verbatim by the
/// orchestrator's delegation mechanism.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    name: String,
    description: String,
    instructions: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    allowed_tools: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "ModelSelector::is_unspecified")]
    model: ModelSelector,
}

impl AgentDefinition {
    /// Starts building a definition for the named agent.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AgentDefinitionBuilder {
        AgentDefinitionBuilder {
            name: name.into(),
            description: None,
            instructions: String::new(),
            allowed_tools: BTreeSet::new(),
            model: ModelSelector::Unspecified,
        }
    }

    /// Returns the unique agent name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description used to decide when to delegate.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the free-form instruction text.
    #[must_use]
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Returns the tool names this agent is permitted to use.
    ///
    /// Resolvability against the orchestrator's capability set is the
    /// consumer's responsibility, not enforced here.
    #[must_use]
    pub fn allowed_tools(&self) -> &BTreeSet<String> {
        &self.allowed_tools
    }

    /// Returns the model selector.
    #[must_use]
    pub fn model(&self) -> &ModelSelector {
        &self.model
    }
}

/// Builder for [`AgentDefinition`].
#[derive(Debug)]
pub struct AgentDefinitionBuilder {
    name: String,
    description: Option<String>,
    instructions: String,
    allowed_tools: BTreeSet<String>,
    model: ModelSelector,
}

impl AgentDefinitionBuilder {
    /// Sets the delegation description.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidDefinition`] when the description is
    /// empty.
    pub fn description(mut self, description: impl Into<String>) -> AgentResult<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(AgentError::InvalidDefinition {
                reason: "description cannot be empty".into(),
            });
        }
        self.description = Some(description);
        Ok(self)
    }

    /// Sets the instruction text.
    #[must_use]
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Permits a single tool.
    #[must_use]
    pub fn allow_tool(mut self, tool: impl Into<String>) -> Self {
        let tool = tool.into();
        if !tool.trim().is_empty() {
            self.allowed_tools.insert(tool);
        }
        self
    }

    /// Replaces the permitted tool set.
    #[must_use]
    pub fn allowed_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tools = tools
            .into_iter()
            .map(Into::into)
            .filter(|tool: &String| !tool.trim().is_empty())
            .collect();
        self
    }

    /// Sets the model selector.
    #[must_use]
    pub fn model(mut self, model: ModelSelector) -> Self {
        self.model = model;
        self
    }

    /// Consumes the builder and returns the definition.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidDefinition`] when the name is empty or
    /// the description was never provided.
    pub fn build(self) -> AgentResult<AgentDefinition> {
        if self.name.trim().is_empty() {
            return Err(AgentError::InvalidDefinition {
                reason: "name cannot be empty".into(),
            });
        }
        let description = self.description.ok_or_else(|| AgentError::InvalidDefinition {
            reason: "description must be provided".into(),
        })?;

        Ok(AgentDefinition {
            name: self.name,
            description,
            instructions: self.instructions,
            allowed_tools: self.allowed_tools,
            model: self.model,
        })
    }
}
