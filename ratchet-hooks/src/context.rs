//! Lifecycle events and the context handed to hook handlers.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle event a hook chain is attached to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum HookEvent {
    /// Fires before a tool call executes; a deny blocks the call.
    PreToolUse,
    /// Fires after a tool call completes.
    PostToolUse,
    /// Fires when the user submits a prompt.
    UserPromptSubmit,
    /// Fires when the session is stopping.
    Stop,
}

impl HookEvent {
    /// Returns the canonical event name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreToolUse => "PreToolUse",
            Self::PostToolUse => "PostToolUse",
            Self::UserPromptSubmit => "UserPromptSubmit",
            Self::Stop => "Stop",
        }
    }
}

impl Display for HookEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context describing the event firing being evaluated.
///
/// For tool events this carries the tool name and its untyped argument
/// payload; hooks inspect the payload without deserializing it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HookContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    tool_input: Map<String, Value>,
}

impl HookContext {
    /// Creates an empty context for events without a tool payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context describing a tool call.
    #[must_use]
    pub fn for_tool(tool_name: impl Into<String>, tool_input: Map<String, Value>) -> Self {
        Self {
            tool_name: Some(tool_name.into()),
            tool_input,
        }
    }

    /// Returns the name of the tool being gated, if any.
    #[must_use]
    pub fn tool_name(&self) -> Option<&str> {
        self.tool_name.as_deref()
    }

    /// Returns the untyped argument payload of the gated tool call.
    #[must_use]
    pub fn tool_input(&self) -> &Map<String, Value> {
        &self.tool_input
    }

    /// Returns a string-valued argument from the payload.
    #[must_use]
    pub fn input_str(&self, key: &str) -> Option<&str> {
        self.tool_input.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_context_exposes_payload() {
        let input = match json!({"command": "ls -la"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let context = HookContext::for_tool("bash", input);

        assert_eq!(context.tool_name(), Some("bash"));
        assert_eq!(context.input_str("command"), Some("ls -la"));
        assert_eq!(context.input_str("missing"), None);
    }

    #[test]
    fn event_names_are_canonical() {
        assert_eq!(HookEvent::PreToolUse.as_str(), "PreToolUse");
        assert_eq!(HookEvent::PostToolUse.to_string(), "PostToolUse");
    }
}
