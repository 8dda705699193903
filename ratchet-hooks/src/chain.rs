//! Hook handler trait and ordered chain evaluation.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::context::{HookContext, HookEvent};
use crate::decision::HookDecision;

/// Trait implemented by hook handlers.
#[async_trait]
pub trait Hook: Send + Sync {
    /// Evaluates the event firing and returns a decision.
    async fn evaluate(&self, context: &HookContext) -> HookDecision;
}

type HookFuture = Pin<Box<dyn Future<Output = HookDecision> + Send + 'static>>;
type ErasedHookFn = dyn Fn(&HookContext) -> HookFuture + Send + Sync;

/// Adapts a plain function into a [`Hook`].
///
/// The function receives the context by reference and must return an owned
/// future, so any data needed across an await point is cloned into it.
pub struct FnHook {
    handler: Arc<ErasedHookFn>,
}

impl FnHook {
    /// Wraps an async function.
    #[must_use]
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(&HookContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookDecision> + Send + 'static,
    {
        Self {
            handler: Arc::new(move |context| Box::pin(handler(context))),
        }
    }

    /// Wraps a synchronous function.
    #[must_use]
    pub fn from_sync<F>(handler: F) -> Self
    where
        F: Fn(&HookContext) -> HookDecision + Send + Sync + 'static,
    {
        Self::new(move |context| {
            let decision = handler(context);
            async move { decision }
        })
    }
}

#[async_trait]
impl Hook for FnHook {
    async fn evaluate(&self, context: &HookContext) -> HookDecision {
        (self.handler)(context).await
    }
}

/// Which non-abstaining decision a chain treats as effective.
///
/// Chains with disagreeing hooks have no single obviously-correct
/// precedence, so the rule is configurable per chain.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ChainPolicy {
    /// The first non-abstaining decision wins (short-circuit).
    #[default]
    FirstDecision,
    /// Any deny wins even when an allow precedes it.
    DenyOverrides,
}

/// Ordered chain of handlers for one event, sharing one matcher.
///
/// Per-tool filtering is not part of the core design; every hook in the
/// matcher sees every firing of its event.
#[derive(Clone)]
pub struct HookMatcher {
    hooks: Vec<Arc<dyn Hook>>,
    policy: ChainPolicy,
}

impl HookMatcher {
    /// Creates a matcher over the supplied handlers in registration order.
    #[must_use]
    pub fn new(hooks: Vec<Arc<dyn Hook>>) -> Self {
        Self {
            hooks,
            policy: ChainPolicy::default(),
        }
    }

    /// Overrides the chain precedence policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ChainPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the number of handlers in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true when the chain holds no handlers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Evaluates the chain for one event firing.
    ///
    /// Handlers run in registration order. Under
    /// [`ChainPolicy::FirstDecision`] the first non-abstaining decision is
    /// effective and later handlers never run; under
    /// [`ChainPolicy::DenyOverrides`] every handler runs and any deny wins.
    /// A chain where every handler abstains allows the action.
    pub async fn evaluate(&self, context: &HookContext) -> HookDecision {
        self.evaluate_raw(context)
            .await
            .unwrap_or_else(HookDecision::allow)
    }

    /// Chain evaluation preserving "every handler abstained" as `None`.
    async fn evaluate_raw(&self, context: &HookContext) -> Option<HookDecision> {
        let mut effective: Option<HookDecision> = None;

        for (index, hook) in self.hooks.iter().enumerate() {
            let decision = hook.evaluate(context).await;
            if decision.is_no_opinion() {
                continue;
            }
            debug!(index, ?decision, "hook decided");
            match self.policy {
                ChainPolicy::FirstDecision => return Some(decision),
                ChainPolicy::DenyOverrides => {
                    if decision.is_deny() {
                        return Some(decision);
                    }
                    effective.get_or_insert(decision);
                }
            }
        }

        effective
    }
}

impl std::fmt::Debug for HookMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookMatcher")
            .field("hooks", &self.hooks.len())
            .field("policy", &self.policy)
            .finish()
    }
}

/// Resolved hook chains grouped by lifecycle event.
///
/// This is the structure the orchestrator consumes: per event, an ordered
/// sequence of matchers, each wrapping its own chain.
#[derive(Clone, Debug, Default)]
pub struct HookSet {
    chains: BTreeMap<HookEvent, Vec<HookMatcher>>,
}

impl HookSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a matcher for an event.
    pub fn attach(&mut self, event: HookEvent, matcher: HookMatcher) {
        self.chains.entry(event).or_default().push(matcher);
    }

    /// Returns the matchers attached to an event.
    #[must_use]
    pub fn matchers(&self, event: HookEvent) -> &[HookMatcher] {
        self.chains.get(&event).map_or(&[], Vec::as_slice)
    }

    /// Returns the events that have at least one matcher.
    pub fn events(&self) -> impl Iterator<Item = HookEvent> + '_ {
        self.chains.keys().copied()
    }

    /// Returns true when no matchers are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Evaluates every matcher for an event and returns the effective
    /// decision, treating matchers like one concatenated chain.
    ///
    /// The gate is synchronous: callers must await the decision before
    /// letting the gated action proceed.
    pub async fn evaluate(&self, event: HookEvent, context: &HookContext) -> HookDecision {
        for matcher in self.matchers(event) {
            // An all-abstain matcher yields no decision; later matchers can
            // still weigh in.
            if let Some(decision) = matcher.evaluate_raw(context).await {
                if decision.is_deny() {
                    debug!(event = %event, reason = decision.reason(), "hook gate denied");
                }
                return decision;
            }
        }
        HookDecision::allow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abstain() -> Arc<dyn Hook> {
        Arc::new(FnHook::from_sync(|_| HookDecision::no_opinion()))
    }

    fn allow() -> Arc<dyn Hook> {
        Arc::new(FnHook::from_sync(|_| HookDecision::allow()))
    }

    fn deny(reason: &'static str) -> Arc<dyn Hook> {
        Arc::new(FnHook::from_sync(move |_| HookDecision::deny(reason)))
    }

    #[tokio::test]
    async fn first_non_abstaining_decision_wins() {
        let chain = HookMatcher::new(vec![abstain(), deny("X"), allow()]);
        let decision = chain.evaluate(&HookContext::new()).await;
        assert_eq!(decision, HookDecision::deny("X"));
    }

    #[tokio::test]
    async fn all_abstain_defaults_to_allow() {
        let chain = HookMatcher::new(vec![abstain(), abstain()]);
        let decision = chain.evaluate(&HookContext::new()).await;
        assert!(decision.is_allow());
    }

    #[tokio::test]
    async fn empty_chain_allows() {
        let chain = HookMatcher::new(Vec::new());
        assert!(chain.evaluate(&HookContext::new()).await.is_allow());
    }

    #[tokio::test]
    async fn first_decision_short_circuits_later_handlers() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let later_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&later_calls);
        let counting: Arc<dyn Hook> = Arc::new(FnHook::from_sync(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            HookDecision::allow()
        }));

        let chain = HookMatcher::new(vec![deny("stop"), counting]);
        let decision = chain.evaluate(&HookContext::new()).await;
        assert!(decision.is_deny());
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn deny_overrides_policy_lets_deny_win_late() {
        let chain = HookMatcher::new(vec![allow(), deny("late veto")])
            .with_policy(ChainPolicy::DenyOverrides);
        let decision = chain.evaluate(&HookContext::new()).await;
        assert_eq!(decision.reason(), Some("late veto"));
    }

    #[tokio::test]
    async fn deny_overrides_policy_keeps_allow_without_deny() {
        let chain =
            HookMatcher::new(vec![abstain(), allow()]).with_policy(ChainPolicy::DenyOverrides);
        assert!(chain.evaluate(&HookContext::new()).await.is_allow());
    }

    #[tokio::test]
    async fn async_hooks_inspect_context() {
        let hook = FnHook::new(|context: &HookContext| {
            let command = context.input_str("command").unwrap_or_default().to_owned();
            async move {
                if command.contains("rm -rf /") {
                    HookDecision::deny("Dangerous command blocked")
                } else {
                    HookDecision::no_opinion()
                }
            }
        });

        let input = match serde_json::json!({"command": "rm -rf /tmp/x"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let context = HookContext::for_tool("bash", input);
        assert!(hook.evaluate(&context).await.is_no_opinion());

        let input = match serde_json::json!({"command": "rm -rf /"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let context = HookContext::for_tool("bash", input);
        assert!(hook.evaluate(&context).await.is_deny());
    }

    #[tokio::test]
    async fn set_concatenates_matchers_per_event() {
        let mut set = HookSet::new();
        set.attach(HookEvent::PreToolUse, HookMatcher::new(vec![abstain()]));
        set.attach(HookEvent::PreToolUse, HookMatcher::new(vec![deny("no")]));

        let decision = set
            .evaluate(HookEvent::PreToolUse, &HookContext::new())
            .await;
        assert!(decision.is_deny());

        let decision = set
            .evaluate(HookEvent::PostToolUse, &HookContext::new())
            .await;
        assert!(decision.is_allow());
    }
}
