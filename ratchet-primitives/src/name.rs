//! Validated identifiers shared across the dispatch framework.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MAX_NAME_LEN: usize = 64;

/// Identifier for a registered tool, unique within one registry.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolName(String);

impl ToolName {
    /// Creates a new tool name after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToolName`] if the supplied name is empty, too
    /// long, or contains unsupported characters.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_identifier(&name).map_err(|reason| Error::InvalidToolName {
            name: name.clone(),
            reason,
        })?;
        Ok(Self(name))
    }

    /// Returns the tool name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ToolName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ToolName> for String {
    fn from(value: ToolName) -> Self {
        value.0
    }
}

/// Identifier for an endpoint bundling a group of tools.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointName(String);

impl EndpointName {
    /// Creates a new endpoint name after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpointName`] if the supplied name is empty,
    /// too long, or contains unsupported characters.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_identifier(&name).map_err(|reason| Error::InvalidEndpointName {
            name: name.clone(),
            reason,
        })?;
        Ok(Self(name))
    }

    /// Returns the endpoint name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EndpointName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EndpointName> for String {
    fn from(value: EndpointName) -> Self {
        value.0
    }
}

/// Fully-qualified capability identifier of the form `<endpoint>__<tool>`.
///
/// The orchestrator's allow-list must contain this exact string for the tool
/// to be callable through its endpoint.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedToolId(String);

impl QualifiedToolId {
    /// Builds the qualified identifier for a tool exposed by an endpoint.
    #[must_use]
    pub fn new(endpoint: &EndpointName, tool: &ToolName) -> Self {
        Self(format!("{endpoint}__{tool}"))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for QualifiedToolId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<QualifiedToolId> for String {
    fn from(value: QualifiedToolId) -> Self {
        value.0
    }
}

fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("identifier cannot be empty".into());
    }

    if name.len() > MAX_NAME_LEN {
        return Err(format!("identifier length must be <= {MAX_NAME_LEN}"));
    }

    if !name
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-' | '_'))
    {
        return Err("identifier must contain lowercase alphanumeric, dash, or underscore".into());
    }

    Ok(())
}
