//! Schema value types and the JSON Schema rendering they produce.

use std::collections::BTreeSet;

use serde_json::{Map, Value, json};

/// Machine-checkable description of one value shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Schema {
    /// A UTF-8 string, optionally constrained by length or an enumeration.
    String(StringSchema),
    /// A whole number, optionally bounded.
    Integer(IntegerSchema),
    /// A floating-point number, optionally bounded below.
    Number(NumberSchema),
    /// A boolean flag.
    Boolean(BooleanSchema),
    /// A homogeneous list with a declared item shape.
    Array(ArraySchema),
    /// A nested object with named properties.
    Object(ObjectSchema),
}

impl Schema {
    /// Returns a short label naming the schema kind.
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Renders the JSON Schema document advertised to the orchestrator.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(schema) => schema.to_value(),
            Self::Integer(schema) => schema.to_value(),
            Self::Number(schema) => schema.to_value(),
            Self::Boolean(schema) => schema.to_value(),
            Self::Array(schema) => schema.to_value(),
            Self::Object(schema) => schema.to_value(),
        }
    }
}

/// Constraints for string-valued fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringSchema {
    description: Option<String>,
    min_length: Option<usize>,
    enum_values: Vec<String>,
}

impl StringSchema {
    /// Creates an unconstrained string schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a human-readable description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Requires a minimum number of characters.
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Restricts the value to one of the supplied members.
    #[must_use]
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn min_length_value(&self) -> Option<usize> {
        self.min_length
    }

    pub(crate) fn enum_members(&self) -> &[String] {
        &self.enum_values
    }

    fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), json!("string"));
        if let Some(description) = &self.description {
            out.insert("description".into(), json!(description));
        }
        if let Some(min) = self.min_length {
            out.insert("minLength".into(), json!(min));
        }
        if !self.enum_values.is_empty() {
            out.insert("enum".into(), json!(self.enum_values));
        }
        Value::Object(out)
    }
}

impl From<StringSchema> for Schema {
    fn from(value: StringSchema) -> Self {
        Self::String(value)
    }
}

/// Constraints for integer-valued fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntegerSchema {
    description: Option<String>,
    minimum: Option<i64>,
    maximum: Option<i64>,
}

impl IntegerSchema {
    /// Creates an unconstrained integer schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a human-readable description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Requires values of at least `min`.
    #[must_use]
    pub fn minimum(mut self, min: i64) -> Self {
        self.minimum = Some(min);
        self
    }

    /// Requires values of at most `max`.
    #[must_use]
    pub fn maximum(mut self, max: i64) -> Self {
        self.maximum = Some(max);
        self
    }

    pub(crate) fn bounds(&self) -> (Option<i64>, Option<i64>) {
        (self.minimum, self.maximum)
    }

    fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), json!("integer"));
        if let Some(description) = &self.description {
            out.insert("description".into(), json!(description));
        }
        if let Some(min) = self.minimum {
            out.insert("minimum".into(), json!(min));
        }
        if let Some(max) = self.maximum {
            out.insert("maximum".into(), json!(max));
        }
        Value::Object(out)
    }
}

impl From<IntegerSchema> for Schema {
    fn from(value: IntegerSchema) -> Self {
        Self::Integer(value)
    }
}

/// Constraints for floating-point fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumberSchema {
    description: Option<String>,
    minimum: Option<f64>,
}

impl NumberSchema {
    /// Creates an unconstrained number schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a human-readable description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Requires values of at least `min`.
    #[must_use]
    pub fn minimum(mut self, min: f64) -> Self {
        self.minimum = Some(min);
        self
    }

    pub(crate) fn minimum_value(&self) -> Option<f64> {
        self.minimum
    }

    fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), json!("number"));
        if let Some(description) = &self.description {
            out.insert("description".into(), json!(description));
        }
        if let Some(min) = self.minimum {
            out.insert("minimum".into(), json!(min));
        }
        Value::Object(out)
    }
}

impl From<NumberSchema> for Schema {
    fn from(value: NumberSchema) -> Self {
        Self::Number(value)
    }
}

/// Boolean fields carry only an optional description.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BooleanSchema {
    description: Option<String>,
}

impl BooleanSchema {
    /// Creates a boolean schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a human-readable description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), json!("boolean"));
        if let Some(description) = &self.description {
            out.insert("description".into(), json!(description));
        }
        Value::Object(out)
    }
}

impl From<BooleanSchema> for Schema {
    fn from(value: BooleanSchema) -> Self {
        Self::Boolean(value)
    }
}

/// Constraints for list-valued fields.
#[derive(Clone, Debug, PartialEq)]
pub struct ArraySchema {
    description: Option<String>,
    items: Box<Schema>,
    min_items: Option<usize>,
}

impl ArraySchema {
    /// Creates an array schema with the supplied item shape.
    #[must_use]
    pub fn new(items: impl Into<Schema>) -> Self {
        Self {
            description: None,
            items: Box::new(items.into()),
            min_items: None,
        }
    }

    /// Attaches a human-readable description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Requires the list to contain at least `min` items.
    #[must_use]
    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    pub(crate) fn item_schema(&self) -> &Schema {
        &self.items
    }

    pub(crate) fn min_items_value(&self) -> Option<usize> {
        self.min_items
    }

    fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), json!("array"));
        if let Some(description) = &self.description {
            out.insert("description".into(), json!(description));
        }
        out.insert("items".into(), self.items.to_value());
        if let Some(min) = self.min_items {
            out.insert("minItems".into(), json!(min));
        }
        Value::Object(out)
    }
}

impl From<ArraySchema> for Schema {
    fn from(value: ArraySchema) -> Self {
        Self::Array(value)
    }
}

/// A nested object shape with required and optional properties.
///
/// Property order is preserved so the rendered document matches the order in
/// which fields were declared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectSchema {
    description: Option<String>,
    properties: Vec<(String, Schema)>,
    required: BTreeSet<String>,
}

impl ObjectSchema {
    /// Creates an empty object schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a human-readable description.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declares a required property.
    #[must_use]
    pub fn required(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        let name = name.into();
        self.required.insert(name.clone());
        self.properties.push((name, schema.into()));
        self
    }

    /// Declares an optional property.
    #[must_use]
    pub fn optional(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.properties.push((name.into(), schema.into()));
        self
    }

    /// Returns the declared properties in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[(String, Schema)] {
        &self.properties
    }

    /// Returns the names of the required properties.
    #[must_use]
    pub fn required_names(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub(crate) fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    fn to_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), json!("object"));
        if let Some(description) = &self.description {
            out.insert("description".into(), json!(description));
        }
        let mut properties = Map::new();
        for (name, schema) in &self.properties {
            properties.insert(name.clone(), schema.to_value());
        }
        out.insert("properties".into(), Value::Object(properties));
        if !self.required.is_empty() {
            out.insert("required".into(), json!(self.required));
        }
        Value::Object(out)
    }
}

impl From<ObjectSchema> for Schema {
    fn from(value: ObjectSchema) -> Self {
        Self::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_document() {
        let schema: Schema = ObjectSchema::new()
            .required(
                "quantity",
                IntegerSchema::new().minimum(1).describe("How many"),
            )
            .optional("notes", StringSchema::new())
            .into();

        let value = schema.to_value();
        assert_eq!(value["type"], "object");
        assert_eq!(value["properties"]["quantity"]["type"], "integer");
        assert_eq!(value["properties"]["quantity"]["minimum"], 1);
        assert_eq!(value["properties"]["quantity"]["description"], "How many");
        assert_eq!(value["required"], serde_json::json!(["quantity"]));
    }

    #[test]
    fn renders_enum_and_array_constraints() {
        let schema: Schema = ObjectSchema::new()
            .required(
                "priority",
                StringSchema::new().one_of(["low", "normal", "high", "urgent"]),
            )
            .required(
                "items",
                ArraySchema::new(ObjectSchema::new().required("product", StringSchema::new()))
                    .min_items(1),
            )
            .into();

        let value = schema.to_value();
        assert_eq!(
            value["properties"]["priority"]["enum"],
            serde_json::json!(["low", "normal", "high", "urgent"])
        );
        assert_eq!(value["properties"]["items"]["minItems"], 1);
        assert_eq!(value["properties"]["items"]["items"]["type"], "object");
    }
}
