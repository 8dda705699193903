//! In-process table of pre-built agent definitions.
//!
//! The library is an explicit, pre-populated mapping handed to loaders by
//! reference; there is no ambient module-level lookup.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::definition::AgentDefinition;
use crate::error::{AgentError, AgentResult};

/// Named collection of pre-built agent definitions.
#[derive(Debug, Default)]
pub struct AgentLibrary {
    agents: HashMap<String, AgentDefinition>,
}

impl AgentLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidDefinition`] when the name is already
    /// present.
    pub fn insert(&mut self, definition: AgentDefinition) -> AgentResult<()> {
        let name = definition.name().to_owned();
        if self.agents.contains_key(&name) {
            return Err(AgentError::InvalidDefinition {
                reason: format!("agent `{name}` is already in the library"),
            });
        }
        debug!(agent = %name, "added agent definition");
        self.agents.insert(name, definition);
        Ok(())
    }

    /// Returns the definition registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AgentDefinition> {
        self.agents.get(name)
    }

    /// Iterates over the registered names in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.agents.keys().map(String::as_str)
    }

    /// Returns the number of definitions in the library.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Returns true when the library holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Resolves a list of symbolic names into their definitions.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownAgent`] for the first name that does not
    /// resolve; resolution fails eagerly at configuration time.
    pub fn load(&self, names: &[&str]) -> AgentResult<BTreeMap<String, AgentDefinition>> {
        let mut out = BTreeMap::new();
        for name in names {
            let definition = self.get(name).ok_or_else(|| AgentError::UnknownAgent {
                name: (*name).to_owned(),
            })?;
            out.insert((*name).to_owned(), definition.clone());
        }
        Ok(out)
    }
}
