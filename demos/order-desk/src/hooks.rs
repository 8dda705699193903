//! Lifecycle hooks for the demo: a tool-call logger and a destructive
//! command gate.

use ratchet_hooks::{HookContext, HookDecision, HookEvent, HookLibrary, HookPlan, HookResult, HookSet};
use tracing::info;

/// Builds the demo hook set: every tool call is logged on both sides of
/// execution, and `rm -rf /` commands are denied before they run.
pub fn hook_set() -> HookResult<HookSet> {
    let mut library = HookLibrary::new();
    library.insert_sync_fn("log_tool", log_tool)?;
    library.insert_sync_fn("block_rm_rf", block_rm_rf)?;
    library.load(
        &HookPlan::new()
            .on(HookEvent::PreToolUse, ["log_tool", "block_rm_rf"])
            .on(HookEvent::PostToolUse, ["log_tool"]),
    )
}

fn log_tool(context: &HookContext) -> HookDecision {
    info!(tool = context.tool_name().unwrap_or("<none>"), "tool call");
    HookDecision::no_opinion()
}

fn block_rm_rf(context: &HookContext) -> HookDecision {
    let command = context.input_str("command").unwrap_or_default();
    if command.contains("rm -rf /") {
        HookDecision::deny("Dangerous command blocked")
    } else {
        HookDecision::no_opinion()
    }
}
