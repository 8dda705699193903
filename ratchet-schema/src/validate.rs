//! Recursive payload validation against a schema description.
//!
//! Validation collects every violated constraint rather than stopping at the
//! first, so a caller sees the full set of problems with one submission.

use std::fmt::{self, Display, Formatter};

use serde_json::Value;

use crate::schema::Schema;

/// One violated constraint, located by a dotted field path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violation {
    path: String,
    message: String,
}

impl Violation {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Returns the dotted path of the offending field, empty at the root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the human-readable constraint description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl Schema {
    /// Validates a payload against this schema.
    ///
    /// # Errors
    ///
    /// Returns every violated constraint; an empty `Ok(())` means the payload
    /// conforms and can be deserialized into the declared input type.
    pub fn validate(&self, value: &Value) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        check(self, value, "", &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn child_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

#[allow(clippy::too_many_lines)]
fn check(schema: &Schema, value: &Value, path: &str, out: &mut Vec<Violation>) {
    match schema {
        Schema::String(string) => {
            let Some(text) = value.as_str() else {
                out.push(Violation::new(path, "must be a string"));
                return;
            };
            if let Some(min) = string.min_length_value() {
                if text.chars().count() < min {
                    out.push(Violation::new(
                        path,
                        format!("must be at least {min} characters"),
                    ));
                }
            }
            let members = string.enum_members();
            if !members.is_empty() && !members.iter().any(|member| member == text) {
                out.push(Violation::new(
                    path,
                    format!("must be one of: {}", members.join(", ")),
                ));
            }
        }
        Schema::Integer(integer) => {
            let Some(number) = value.as_i64() else {
                out.push(Violation::new(path, "must be an integer"));
                return;
            };
            let (minimum, maximum) = integer.bounds();
            if let Some(min) = minimum {
                if number < min {
                    out.push(Violation::new(path, format!("must be at least {min}")));
                }
            }
            if let Some(max) = maximum {
                if number > max {
                    out.push(Violation::new(path, format!("must be at most {max}")));
                }
            }
        }
        Schema::Number(number_schema) => {
            let Some(number) = value.as_f64() else {
                out.push(Violation::new(path, "must be a number"));
                return;
            };
            if let Some(min) = number_schema.minimum_value() {
                if number < min {
                    out.push(Violation::new(path, format!("must be at least {min}")));
                }
            }
        }
        Schema::Boolean(_) => {
            if !value.is_boolean() {
                out.push(Violation::new(path, "must be a boolean"));
            }
        }
        Schema::Array(array) => {
            let Some(items) = value.as_array() else {
                out.push(Violation::new(path, "must be an array"));
                return;
            };
            if let Some(min) = array.min_items_value() {
                if items.len() < min {
                    out.push(Violation::new(
                        path,
                        format!("must contain at least {min} items"),
                    ));
                }
            }
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                check(array.item_schema(), item, &item_path, out);
            }
        }
        Schema::Object(object) => {
            let Some(fields) = value.as_object() else {
                out.push(Violation::new(path, "must be an object"));
                return;
            };
            // Unknown payload fields are tolerated; only declared properties
            // are checked.
            for (name, property) in object.properties() {
                let property_path = child_path(path, name);
                match fields.get(name) {
                    None => {
                        if object.is_required(name) {
                            out.push(Violation::new(&property_path, "missing required field"));
                        }
                    }
                    // Explicit null on an optional field reads as absent.
                    Some(Value::Null) if !object.is_required(name) => {}
                    Some(field_value) => check(property, field_value, &property_path, out),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ArraySchema, IntegerSchema, NumberSchema, ObjectSchema, StringSchema};
    use serde_json::json;

    fn order_schema() -> Schema {
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

    #[test]
    fn conforming_payload_passes() {
        let payload = json!({
            "customer": {"name": "John Doe", "email": "john@example.com"},
            "items": [{"product": "laptop", "quantity": 2, "price": 999.0}],
            "priority": "high",
        });
        assert!(order_schema().validate(&payload).is_ok());
    }

    #[test]
    fn missing_required_field_is_reported() {
        let payload = json!({
            "items": [{"product": "laptop", "quantity": 1, "price": 10.0}],
            "priority": "low",
        });
        let violations = order_schema().validate(&payload).unwrap_err();
        assert!(
            violations
                .iter()
                .any(|v| v.path() == "customer" && v.message() == "missing required field")
        );
    }

    #[test]
    fn quantity_below_minimum_names_the_field() {
        let payload = json!({
            "customer": {"name": "Jane", "email": "jane@example.com"},
            "items": [{"product": "mouse", "quantity": 0, "price": 29.0}],
            "priority": "normal",
        });
        let violations = order_schema().validate(&payload).unwrap_err();
        let rendered: Vec<String> = violations.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["items[0].quantity: must be at least 1"]);
    }

    #[test]
    fn enum_violation_lists_members() {
        let payload = json!({
            "customer": {"name": "Jane", "email": "jane@example.com"},
            "items": [{"product": "mouse", "quantity": 1, "price": 29.0}],
            "priority": "asap",
        });
        let violations = order_schema().validate(&payload).unwrap_err();
        assert_eq!(
            violations[0].to_string(),
            "priority: must be one of: low, normal, high, urgent"
        );
    }

    #[test]
    fn empty_collection_violates_min_items() {
        let payload = json!({
            "customer": {"name": "Jane", "email": "jane@example.com"},
            "items": [],
            "priority": "low",
        });
        let violations = order_schema().validate(&payload).unwrap_err();
        assert_eq!(
            violations[0].to_string(),
            "items: must contain at least 1 items"
        );
    }

    #[test]
    fn all_violations_are_collected() {
        let payload = json!({
            "customer": {"name": "", "email": 7},
            "items": [],
            "priority": "asap",
        });
        let violations = order_schema().validate(&payload).unwrap_err();
        assert_eq!(violations.len(), 4);
    }

    #[test]
    fn optional_null_reads_as_absent() {
        let payload = json!({
            "customer": {"name": "Jane", "email": "jane@example.com"},
            "items": [{"product": "mouse", "quantity": 1, "price": 29.0}],
            "priority": "low",
            "notes": null,
        });
        assert!(order_schema().validate(&payload).is_ok());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let payload = json!({
            "customer": {"name": "Jane", "email": "jane@example.com"},
            "items": [{"product": "mouse", "quantity": 1, "price": 29.0}],
            "priority": "low",
            "extra": true,
        });
        assert!(order_schema().validate(&payload).is_ok());
    }
}
