//! Order-desk demo: wires custom tools, sub-agents, and lifecycle hooks
//! into one orchestrator configuration and drives it end to end.

mod agents;
mod hooks;
mod tools;

use std::path::Path;

use anyhow::{Context, Result};
use ratchet_config::OrchestratorConfig;
use ratchet_hooks::{HookContext, HookEvent};
use serde_json::{Map, Value, json};
use tracing::info;

const BUILTIN_TOOLS: [&str; 6] = ["Read", "Write", "Edit", "Glob", "Grep", "Bash"];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    info!("=== Order Desk: Capability Dispatch Example ===");

    let config = assemble()?;
    info!(allowed = ?config.allowed_tools(), "configuration assembled");

    dispatch_examples(&config).await?;
    hook_gate_examples(&config).await;

    Ok(())
}

/// Assembles the full orchestrator configuration: one endpoint of custom
/// tools, three sub-agents, and the demo hook chains.
fn assemble() -> Result<OrchestratorConfig> {
    let registry = tools::registry()?;
    let endpoint = registry.endpoint(
        "custom",
        &["calculator", "current_time", "random_number", "create_order"],
    )?;

    let agents = agents::library(Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/agents")))?;
    let names: Vec<&str> = agents.names().collect();
    let loaded = agents.load(&names)?;

    let config = OrchestratorConfig::assembler()
        .builtin_tools(BUILTIN_TOOLS)
        .endpoint(endpoint)
        .agents(loaded.into_values())
        .hooks(hooks::hook_set()?)
        .build()?;
    Ok(config)
}

/// Invokes each custom tool through its endpoint, including one call
/// that fails schema validation.
async fn dispatch_examples(config: &OrchestratorConfig) -> Result<()> {
    info!("--- Example 1: Tool Dispatch ---");
    let endpoint = config
        .endpoint("custom")
        .context("custom endpoint missing from configuration")?;

    let result = endpoint
        .invoke("calculator", &args(json!({"expression": "2 + 2 * 3"})))
        .await?;
    info!(envelope = %serde_json::to_string(&result.envelope())?, "calculator");

    let result = endpoint.invoke("current_time", &args(json!({}))).await?;
    info!(envelope = %serde_json::to_string(&result.envelope())?, "current_time");

    let result = endpoint
        .invoke("random_number", &args(json!({"min_val": 10, "max_val": 20})))
        .await?;
    info!(envelope = %serde_json::to_string(&result.envelope())?, "random_number");

    let result = endpoint
        .invoke(
            "create_order",
            &args(json!({
                "customer": {"name": "John Doe", "email": "john@example.com"},
                "items": [
                    {"product": "laptop", "quantity": 1, "price": 1299.0},
                    {"product": "dock", "quantity": 2, "price": 89.0},
                ],
                "priority": "high",
                "notes": "expedite shipping",
            })),
        )
        .await?;
    info!(envelope = %serde_json::to_string(&result.envelope())?, "create_order");

    // A payload that violates the schema never reaches the handler; the
    // violations come back in the error envelope instead.
    let result = endpoint
        .invoke(
            "create_order",
            &args(json!({
                "customer": {"name": "", "email": "nobody@example.com"},
                "items": [],
                "priority": "asap",
            })),
        )
        .await?;
    info!(envelope = %serde_json::to_string(&result.envelope())?, "create_order (invalid)");

    Ok(())
}

/// Runs the pre-tool-use gate against a safe and a dangerous command.
async fn hook_gate_examples(config: &OrchestratorConfig) {
    info!("--- Example 2: Hook Gates ---");

    let context = HookContext::for_tool("Bash", args(json!({"command": "cargo fmt"})));
    let decision = config.hooks().evaluate(HookEvent::PreToolUse, &context).await;
    info!(?decision, "gate for 'cargo fmt'");

    let context = HookContext::for_tool("Bash", args(json!({"command": "rm -rf /"})));
    let decision = config.hooks().evaluate(HookEvent::PreToolUse, &context).await;
    info!(?decision, "gate for 'rm -rf /'");
}

fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => unreachable!("demo payloads are objects, got {other}"),
    }
}
