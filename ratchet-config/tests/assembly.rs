//! End-to-end assembly: registry, agents, and hooks wired into one
//! configuration, then driven the way an orchestrator would.

use ratchet_agents::{AgentDefinition, AgentLibrary, ModelSelector};
use ratchet_config::OrchestratorConfig;
use ratchet_hooks::{HookContext, HookDecision, HookEvent, HookLibrary, HookPlan};
use ratchet_schema::{
    ArraySchema, IntegerSchema, NumberSchema, ObjectSchema, Schema, StringSchema, ToolInput,
};
use ratchet_tools::{AdapterResult, ToolAdapter, ToolRegistry};
use serde::Deserialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Deserialize)]
struct Customer {
    name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct OrderItem {
    product: String,
    quantity: i64,
    price: f64,
}

#[derive(Debug, Deserialize)]
struct OrderInput {
    customer: Customer,
    items: Vec<OrderItem>,
    priority: String,
    #[serde(default)]
    notes: Option<String>,
}

impl ToolInput for OrderInput {
    fn schema() -> Schema {
        ObjectSchema::new()
            .required(
                "customer",
                ObjectSchema::new()
                    .required("name", StringSchema::new().min_length(1))
                    .required("email", StringSchema::new()),
            )
            .required(
                "items",
                ArraySchema::new(
                    ObjectSchema::new()
                        .required("product", StringSchema::new())
                        .required("quantity", IntegerSchema::new().minimum(1))
                        .required("price", NumberSchema::new().minimum(0.0)),
                )
                .min_items(1),
            )
            .required(
                "priority",
                StringSchema::new().one_of(["low", "normal", "high", "urgent"]),
            )
            .optional("notes", StringSchema::new())
            .into()
    }
}

#[allow(clippy::unused_async)]
async fn create_order(input: OrderInput) -> Result<String, ratchet_tools::ToolError> {
    let total: f64 = input
        .items
        .iter()
        .map(|item| item.quantity as f64 * item.price)
        .sum();
    let mut summary = format!(
        "Order for {} ({})\nPriority: {}\nItems: {}, Total: ${total:.2}",
        input.customer.name,
        input.customer.email,
        input.priority.to_uppercase(),
        input.items.len(),
    );
    if let Some(notes) = input.notes {
        summary.push_str(&format!("\nNotes: {notes}"));
    }
    Ok(summary)
}

fn args(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn build_config() -> OrchestratorConfig {
    let mut registry = ToolRegistry::new();
    registry
        .register(
            ToolAdapter::new(
                "create_order",
                "Create order with customer, items, priority",
                create_order,
            )
            .unwrap(),
        )
        .unwrap();
    let endpoint = registry.endpoint("custom", &["create_order"]).unwrap();

    let mut agents = AgentLibrary::new();
    agents
        .insert(
            AgentDefinition::builder("code_reviewer")
                .description("Expert code review specialist.")
                .unwrap()
                .instructions("You are a senior code reviewer.")
                .allowed_tools(["Read", "Grep", "Glob"])
                .model(ModelSelector::parse("sonnet"))
                .build()
                .unwrap(),
        )
        .unwrap();

    let mut hooks = HookLibrary::new();
    hooks
        .insert_sync_fn("log_tool", |_context| HookDecision::no_opinion())
        .unwrap();
    hooks
        .insert_sync_fn("block_rm_rf", |context: &HookContext| {
            let command = context.input_str("command").unwrap_or_default();
            if command.contains("rm -rf /") {
                HookDecision::deny("Dangerous command blocked")
            } else {
                HookDecision::no_opinion()
            }
        })
        .unwrap();
    let hook_set = hooks
        .load(
            &HookPlan::new()
                .on(HookEvent::PreToolUse, ["log_tool", "block_rm_rf"])
                .on(HookEvent::PostToolUse, ["log_tool"]),
        )
        .unwrap();

    OrchestratorConfig::assembler()
        .builtin_tools(["Read", "Write", "Edit", "Glob", "Grep", "Bash"])
        .endpoint(endpoint)
        .agents(agents.load(&["code_reviewer"]).unwrap().into_values())
        .hooks(hook_set)
        .build()
        .unwrap()
}

#[test]
fn allow_list_covers_builtins_and_custom_tools() {
    let config = build_config();
    assert_eq!(
        config.allowed_tools(),
        [
            "Read",
            "Write",
            "Edit",
            "Glob",
            "Grep",
            "Bash",
            "custom__create_order"
        ]
    );
}

#[tokio::test]
async fn valid_order_flows_through_the_endpoint() {
    let config = build_config();
    let endpoint = config.endpoint("custom").unwrap();

    let payload = args(json!({
        "customer": {"name": "John Doe", "email": "john@example.com"},
        "items": [
            {"product": "laptop", "quantity": 2, "price": 999.0},
            {"product": "mouse", "quantity": 1, "price": 29.0},
        ],
        "priority": "high",
    }));
    let result = endpoint.invoke("create_order", &payload).await.unwrap();

    let AdapterResult::Ok(summary) = result else {
        panic!("expected success, got {result:?}");
    };
    assert!(summary.contains("Order for John Doe (john@example.com)"));
    assert!(summary.contains("Priority: HIGH"));
    assert!(summary.contains("Items: 2, Total: $2027.00"));
}

#[tokio::test]
async fn invalid_order_reports_constraints_without_running_the_handler() {
    let config = build_config();
    let endpoint = config.endpoint("custom").unwrap();

    let payload = args(json!({
        "customer": {"name": "John Doe", "email": "john@example.com"},
        "items": [{"product": "laptop", "quantity": 0, "price": 999.0}],
        "priority": "asap",
    }));
    let result = endpoint.invoke("create_order", &payload).await.unwrap();

    let envelope = result.envelope();
    assert!(envelope.is_error());
    let text = envelope.first_text().unwrap();
    assert!(text.starts_with("Validation error: "), "got: {text}");
    assert!(text.contains("items[0].quantity"), "got: {text}");
    assert!(text.contains("priority"), "got: {text}");
}

#[tokio::test]
async fn pre_tool_use_gate_blocks_dangerous_commands() {
    let config = build_config();

    let context = HookContext::for_tool("Bash", args(json!({"command": "rm -rf /"})));
    let decision = config.hooks().evaluate(HookEvent::PreToolUse, &context).await;
    assert_eq!(decision.reason(), Some("Dangerous command blocked"));

    let context = HookContext::for_tool("Bash", args(json!({"command": "cargo fmt"})));
    let decision = config.hooks().evaluate(HookEvent::PreToolUse, &context).await;
    assert!(decision.is_allow());
}

#[test]
fn agents_are_carried_verbatim() {
    let config = build_config();
    let reviewer = &config.agents()["code_reviewer"];
    assert_eq!(reviewer.description(), "Expert code review specialist.");
    assert!(reviewer.allowed_tools().contains("Grep"));
    assert_eq!(reviewer.model(), &ModelSelector::Named("sonnet".into()));
}
