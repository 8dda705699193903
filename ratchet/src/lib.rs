//! Capability registration and dispatch toolkit facade.
//!
//! Depend on this crate via `cargo add ratchet`. It bundles the component
//! crates behind feature flags so an orchestrator can pull in only the
//! pieces it needs: schema-validated tool adapters, agent definitions,
//! lifecycle hook chains, and the configuration assembler that ties them
//! together.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use ratchet_primitives as primitives;

/// Typed input schemas and payload validation (enabled by `schema` feature).
#[cfg(feature = "schema")]
pub use ratchet_schema as schema;

/// Tool adapters, registry, and endpoints (enabled by `tools` feature).
#[cfg(feature = "tools")]
pub use ratchet_tools as tools;

/// Agent definitions, libraries, and document loading (enabled by `agents` feature).
#[cfg(feature = "agents")]
pub use ratchet_agents as agents;

/// Lifecycle hook chains and gate evaluation (enabled by `hooks` feature).
#[cfg(feature = "hooks")]
pub use ratchet_hooks as hooks;

/// Orchestrator configuration assembly (enabled by `config` feature).
#[cfg(feature = "config")]
pub use ratchet_config as config;
