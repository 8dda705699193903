//! Named hook registration and plan-driven chain loading.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::chain::{ChainPolicy, FnHook, Hook, HookMatcher, HookSet};
use crate::context::{HookContext, HookEvent};
use crate::decision::HookDecision;
use crate::error::{HookError, HookResult};

/// Explicit, pre-populated mapping from hook name to handler.
#[derive(Default)]
pub struct HookLibrary {
    hooks: HashMap<String, Arc<dyn Hook>>,
}

impl HookLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under a symbolic name.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::DuplicateHook`] if the name is already present.
    pub fn insert<H>(&mut self, name: impl Into<String>, hook: H) -> HookResult<()>
    where
        H: Hook + 'static,
    {
        let name = name.into();
        if self.hooks.contains_key(&name) {
            return Err(HookError::DuplicateHook { name });
        }
        debug!(hook = %name, "registered hook");
        self.hooks.insert(name, Arc::new(hook));
        Ok(())
    }

    /// Registers an async function as a hook.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::DuplicateHook`] if the name is already present.
    pub fn insert_fn<F, Fut>(&mut self, name: impl Into<String>, handler: F) -> HookResult<()>
    where
        F: Fn(&HookContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookDecision> + Send + 'static,
    {
        self.insert(name, FnHook::new(handler))
    }

    /// Registers a synchronous function as a hook.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::DuplicateHook`] if the name is already present.
    pub fn insert_sync_fn<F>(&mut self, name: impl Into<String>, handler: F) -> HookResult<()>
    where
        F: Fn(&HookContext) -> HookDecision + Send + Sync + 'static,
    {
        self.insert(name, FnHook::from_sync(handler))
    }

    /// Returns the handler registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Hook>> {
        self.hooks.get(name).cloned()
    }

    /// Resolves a plan of symbolic names into per-event chains.
    ///
    /// All hooks named for one event share one matcher, in the order the
    /// plan lists them.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::UnknownHook`] for the first name that does not
    /// resolve; resolution fails eagerly at load time.
    pub fn load(&self, plan: &HookPlan) -> HookResult<HookSet> {
        let mut set = HookSet::new();
        for (event, names) in &plan.entries {
            let mut chain = Vec::with_capacity(names.len());
            for name in names {
                let hook = self.get(name).ok_or_else(|| HookError::UnknownHook {
                    name: name.clone(),
                })?;
                chain.push(hook);
            }
            debug!(event = %event, hooks = chain.len(), "loaded hook chain");
            set.attach(*event, HookMatcher::new(chain).with_policy(plan.policy));
        }
        Ok(set)
    }
}

impl std::fmt::Debug for HookLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.hooks.keys().cloned().collect();
        f.debug_struct("HookLibrary")
            .field("registered", &names)
            .finish()
    }
}

/// Mapping from lifecycle event to the ordered hook names to attach.
#[derive(Clone, Debug, Default)]
pub struct HookPlan {
    entries: Vec<(HookEvent, Vec<String>)>,
    policy: ChainPolicy,
}

impl HookPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an ordered list of hook names to an event.
    #[must_use]
    pub fn on<I, S>(mut self, event: HookEvent, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .push((event, names.into_iter().map(Into::into).collect()));
        self
    }

    /// Overrides the precedence policy applied to every loaded chain.
    #[must_use]
    pub fn with_policy(mut self, policy: ChainPolicy) -> Self {
        self.policy = policy;
        self
    }
}
