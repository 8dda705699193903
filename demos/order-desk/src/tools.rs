//! Custom tools for the order-desk demo: a safe calculator, a clock, a
//! random number generator, and an order intake tool with a nested schema.

use chrono::{FixedOffset, Utc};
use rand::Rng;
use ratchet_schema::{
    ArraySchema, IntegerSchema, NumberSchema, ObjectSchema, Schema, StringSchema, ToolInput,
};
use ratchet_tools::{ToolAdapter, ToolError, ToolRegistry, ToolResult};
use serde::Deserialize;

/// Registers every demo tool and returns the populated registry.
pub fn registry() -> ToolResult<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(ToolAdapter::new(
        "calculator",
        "Evaluate mathematical expressions safely",
        calculator,
    )?)?;
    registry.register(ToolAdapter::new(
        "current_time",
        "Get current date and time",
        current_time,
    )?)?;
    registry.register(ToolAdapter::new(
        "random_number",
        "Generate random integer in range",
        random_number,
    )?)?;
    registry.register(ToolAdapter::new(
        "create_order",
        "Create order with customer, items, priority",
        create_order,
    )?)?;
    Ok(registry)
}

#[derive(Debug, Deserialize)]
pub struct CalculatorInput {
    expression: String,
}

impl ToolInput for CalculatorInput {
    fn schema() -> Schema {
        ObjectSchema::new()
            .required(
                "expression",
                StringSchema::new().describe("Mathematical expression (e.g., '2 + 2 * 3')"),
            )
            .into()
    }
}

async fn calculator(input: CalculatorInput) -> ToolResult<String> {
    let allowed = |c: char| c.is_ascii_digit() || "+-*/.() ".contains(c);
    if !input.expression.chars().all(allowed) {
        return Ok("Error: Invalid characters".to_string());
    }
    let value = eval::evaluate(&input.expression).map_err(ToolError::execution)?;
    if value.fract() == 0.0 && value.abs() < 1e15 {
        Ok(format!("{} = {}", input.expression, value as i64))
    } else {
        Ok(format!("{} = {value}", input.expression))
    }
}

#[derive(Debug, Deserialize)]
pub struct CurrentTimeInput {
    #[serde(default = "CurrentTimeInput::default_timezone")]
    timezone: String,
}

impl CurrentTimeInput {
    fn default_timezone() -> String {
        "UTC".to_string()
    }
}

impl ToolInput for CurrentTimeInput {
    fn schema() -> Schema {
        ObjectSchema::new()
            .optional(
                "timezone",
                StringSchema::new().describe("Timezone (e.g., 'UTC', '+05:30')"),
            )
            .into()
    }
}

#[allow(clippy::unused_async)]
async fn current_time(input: CurrentTimeInput) -> ToolResult<String> {
    // Unknown zones fall back to UTC rather than failing the call.
    let stamp = match input.timezone.parse::<FixedOffset>() {
        Ok(offset) => Utc::now()
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string(),
        Err(_) => Utc::now().format("%Y-%m-%d %H:%M:%S %Z").to_string(),
    };
    Ok(stamp)
}

#[derive(Debug, Deserialize)]
pub struct RandomNumberInput {
    #[serde(default = "RandomNumberInput::default_min")]
    min_val: i64,
    #[serde(default = "RandomNumberInput::default_max")]
    max_val: i64,
}

impl RandomNumberInput {
    fn default_min() -> i64 {
        1
    }

    fn default_max() -> i64 {
        100
    }
}

impl ToolInput for RandomNumberInput {
    fn schema() -> Schema {
        ObjectSchema::new()
            .optional(
                "min_val",
                IntegerSchema::new().minimum(1).describe("Minimum value"),
            )
            .optional(
                "max_val",
                IntegerSchema::new().minimum(1).describe("Maximum value"),
            )
            .into()
    }
}

#[allow(clippy::unused_async)]
async fn random_number(input: RandomNumberInput) -> ToolResult<String> {
    if input.min_val > input.max_val {
        return Err(ToolError::execution(format!(
            "empty range: {} > {}",
            input.min_val, input.max_val
        )));
    }
    let value = rand::thread_rng().gen_range(input.min_val..=input.max_val);
    Ok(value.to_string())
}

#[derive(Debug, Deserialize)]
pub struct Customer {
    name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
pub struct OrderItem {
    #[allow(dead_code)]
    product: String,
    quantity: i64,
    price: f64,
}

#[derive(Debug, Deserialize)]
pub struct OrderInput {
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

#[allow(clippy::unused_async, clippy::cast_precision_loss)]
async fn create_order(input: OrderInput) -> ToolResult<String> {
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

/// Minimal arithmetic evaluator: `+ - * /`, parentheses, decimals.
mod eval {
    pub fn evaluate(expression: &str) -> Result<f64, String> {
        let tokens: Vec<char> = expression.chars().filter(|c| !c.is_whitespace()).collect();
        let mut parser = Parser { tokens, pos: 0 };
        let value = parser.expr()?;
        if parser.pos != parser.tokens.len() {
            return Err(format!(
                "unexpected character at position {}",
                parser.pos
            ));
        }
        Ok(value)
    }

    struct Parser {
        tokens: Vec<char>,
        pos: usize,
    }

    impl Parser {
        fn peek(&self) -> Option<char> {
            self.tokens.get(self.pos).copied()
        }

        fn expr(&mut self) -> Result<f64, String> {
            let mut value = self.term()?;
            while let Some(op) = self.peek() {
                match op {
                    '+' => {
                        self.pos += 1;
                        value += self.term()?;
                    }
                    '-' => {
                        self.pos += 1;
                        value -= self.term()?;
                    }
                    _ => break,
                }
            }
            Ok(value)
        }

        fn term(&mut self) -> Result<f64, String> {
            let mut value = self.factor()?;
            while let Some(op) = self.peek() {
                match op {
                    '*' => {
                        self.pos += 1;
                        value *= self.factor()?;
                    }
                    '/' => {
                        self.pos += 1;
                        let divisor = self.factor()?;
                        if divisor == 0.0 {
                            return Err("division by zero".to_string());
                        }
                        value /= divisor;
                    }
                    _ => break,
                }
            }
            Ok(value)
        }

        fn factor(&mut self) -> Result<f64, String> {
            match self.peek() {
                Some('(') => {
                    self.pos += 1;
                    let value = self.expr()?;
                    if self.peek() != Some(')') {
                        return Err("unbalanced parentheses".to_string());
                    }
                    self.pos += 1;
                    Ok(value)
                }
                Some('-') => {
                    self.pos += 1;
                    Ok(-self.factor()?)
                }
                Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
                Some(c) => Err(format!("unexpected '{c}'")),
                None => Err("unexpected end of expression".to_string()),
            }
        }

        fn number(&mut self) -> Result<f64, String> {
            let start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
                self.pos += 1;
            }
            let literal: String = self.tokens[start..self.pos].iter().collect();
            literal
                .parse::<f64>()
                .map_err(|_| format!("bad number '{literal}'"))
        }
    }

}
