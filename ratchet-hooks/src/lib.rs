//! Lifecycle hooks that observe or gate orchestrator events.
//!
//! Hooks are resolved by name into ordered chains, one chain per lifecycle
//! event. A chain is a synchronous gate: its effective decision must be known
//! before the gated action proceeds.

#![warn(missing_docs, clippy::pedantic)]

mod chain;
mod context;
mod decision;
mod error;
mod library;

pub use chain::{ChainPolicy, FnHook, Hook, HookMatcher, HookSet};
pub use context::{HookContext, HookEvent};
pub use decision::HookDecision;
pub use error::{HookError, HookResult};
pub use library::{HookLibrary, HookPlan};
