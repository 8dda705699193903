//! Wire-level result envelope handed back to the orchestrator.
//!
//! The shape is a hard compatibility contract:
//! `{"content":[{"type":"text","text":…}]}` with an optional `"is_error":true`
//! marker on failures. Field names must not change.

use serde::{Deserialize, Serialize};

/// One block of renderable content inside a [`ResultEnvelope`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content.
    Text {
        /// The text payload.
        text: String,
    },
}

impl ContentBlock {
    /// Creates a text content block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Uniform envelope wrapping the outcome of one tool call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_error: Option<bool>,
}

impl ResultEnvelope {
    /// Wraps a successful text result.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: None,
        }
    }

    /// Wraps a failure message, marking the envelope as an error result.
    #[must_use]
    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: Some(true),
        }
    }

    /// Returns the content blocks.
    #[must_use]
    pub fn content(&self) -> &[ContentBlock] {
        &self.content
    }

    /// Returns true when the envelope carries an error result.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error == Some(true)
    }

    /// Returns the text of the first content block, if any.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|block| match block {
            ContentBlock::Text { text } => text.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_serializes_without_error_marker() {
        let envelope = ResultEnvelope::success("2 + 2 = 4");
        let value = serde_json::to_value(&envelope).expect("serialize");

        assert_eq!(
            value,
            json!({"content": [{"type": "text", "text": "2 + 2 = 4"}]})
        );
    }

    #[test]
    fn failure_envelope_carries_is_error() {
        let envelope = ResultEnvelope::failure("boom");
        let value = serde_json::to_value(&envelope).expect("serialize");

        assert_eq!(
            value,
            json!({"content": [{"type": "text", "text": "boom"}], "is_error": true})
        );
        assert!(envelope.is_error());
    }

    #[test]
    fn round_trips_through_json() {
        let envelope = ResultEnvelope::failure("nope");
        let text = serde_json::to_string(&envelope).expect("serialize");
        let parsed: ResultEnvelope = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(parsed, envelope);
        assert_eq!(parsed.first_text(), Some("nope"));
    }
}
