//! Sub-agent definitions for the demo: one built in code, the rest
//! loaded from markdown documents in `agents/`.

use std::path::Path;

use anyhow::Context;
use ratchet_agents::{AgentDefinition, AgentLibrary, ModelSelector, load_from_dir};
use tracing::warn;

/// Builds the agent library from the in-code debugger definition plus
/// every document under `dir`.
pub fn library(dir: &Path) -> anyhow::Result<AgentLibrary> {
    let mut library = AgentLibrary::new();
    library.insert(debugger()?)?;

    let loaded = load_from_dir(dir)
        .with_context(|| format!("loading agent documents from {}", dir.display()))?;
    for failure in loaded.failures() {
        warn!(path = %failure.path().display(), error = %failure.error(), "skipping agent document");
    }
    for definition in loaded.into_agents().into_values() {
        library.insert(definition)?;
    }
    Ok(library)
}

fn debugger() -> anyhow::Result<AgentDefinition> {
    let definition = AgentDefinition::builder("debugger")
        .description(
            "Debugging specialist for errors, test failures, and unexpected behavior. \
             Use when encountering bugs or issues.",
        )?
        .instructions(
            "You are an expert debugger specializing in root cause analysis.\n\n\
             Debugging process:\n\
             1. Capture error message and stack trace\n\
             2. Identify reproduction steps\n\
             3. Isolate the failure location\n\
             4. Implement minimal fix\n\
             5. Verify solution works\n\n\
             Focus on fixing the underlying issue, not just symptoms.",
        )
        .allowed_tools(["Read", "Edit", "Write", "Grep", "Glob", "Bash"])
        .model(ModelSelector::Inherit)
        .build()?;
    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debugger_inherits_the_orchestrator_model() {
        let definition = debugger().unwrap();
        assert_eq!(definition.model(), &ModelSelector::Inherit);
        assert!(definition.allowed_tools().contains("Bash"));
    }
}
