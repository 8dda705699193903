//! Errors raised while registering or resolving hooks.

use thiserror::Error;

/// Result alias for hook operations.
pub type HookResult<T> = Result<T, HookError>;

/// Errors produced by hook registration and loading.
#[derive(Debug, Error)]
pub enum HookError {
    /// Hook name collided with an existing registration.
    #[error("hook `{name}` is already registered")]
    DuplicateHook {
        /// Name of the offending hook.
        name: String,
    },

    /// A symbolic name did not resolve to a registered hook.
    #[error("hook `{name}` is not registered")]
    UnknownHook {
        /// Name of the missing hook.
        name: String,
    },
}
