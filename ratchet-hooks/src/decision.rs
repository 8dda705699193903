//! Decisions emitted by hook handlers.

use serde::{Deserialize, Serialize};

/// Outcome of one hook evaluation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum HookDecision {
    /// The gated action may proceed.
    Allow,
    /// The gated action is rejected; the reason is surfaced to the invoking
    /// context.
    Deny {
        /// Human-readable explanation for the rejection.
        reason: String,
    },
    /// The hook abstains; later handlers in the chain decide.
    NoOpinion,
}

impl HookDecision {
    /// Returns an allow decision.
    #[must_use]
    pub fn allow() -> Self {
        Self::Allow
    }

    /// Returns a deny decision with an explanatory reason.
    #[must_use]
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Deny {
            reason: reason.into(),
        }
    }

    /// Returns an abstaining decision.
    #[must_use]
    pub fn no_opinion() -> Self {
        Self::NoOpinion
    }

    /// Returns true when the decision allows the action.
    #[must_use]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns true when the decision denies the action.
    #[must_use]
    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }

    /// Returns true when the hook abstained.
    #[must_use]
    pub fn is_no_opinion(&self) -> bool {
        matches!(self, Self::NoOpinion)
    }

    /// Returns the reason attached to a deny decision.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Deny { reason } => Some(reason),
            _ => None,
        }
    }
}
