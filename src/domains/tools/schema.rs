//! Tool schema descriptors.
//!
//! A `ToolSchema` declares a tool's parameters in order: primitive type,
//! optionality, default, allowed values and nullability. The validator
//! consumes it, and `to_json_schema()` renders it for tool discovery.
//!
//! The JSON Schema is rendered from the descriptor rather than derived with
//! `schemars`: the validator needs the same declarations as runtime data, and
//! conditional requirements (`RequiredIf`) have no derive equivalent.
//!
//! `integer` parameters are signed 64-bit: values outside that range are
//! reported as invalid, since storage holds stock counts as SQLite INTEGER.

use rmcp::model::JsonObject;
use serde_json::{Value, json};
use std::fmt;

/// Primitive type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    String,
    Number,
    Integer,
    Boolean,
}

impl PrimitiveType {
    /// JSON Schema type keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of a single parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub primitive: PrimitiveType,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<Value>,
    pub allowed: Option<Vec<&'static str>>,
    pub nullable: bool,
    pub minimum: Option<f64>,
}

impl ParamSpec {
    fn new(name: &'static str, primitive: PrimitiveType, description: &'static str) -> Self {
        Self {
            name,
            primitive,
            description,
            required: false,
            default: None,
            allowed: None,
            nullable: false,
            minimum: None,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, PrimitiveType::String, description)
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, PrimitiveType::Number, description)
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, PrimitiveType::Integer, description)
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, PrimitiveType::Boolean, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn one_of(mut self, allowed: &[&'static str]) -> Self {
        self.allowed = Some(allowed.to_vec());
        self
    }

    pub fn minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    fn to_json_schema(&self) -> Value {
        let mut property = serde_json::Map::new();
        let type_value = if self.nullable {
            json!([self.primitive.as_str(), "null"])
        } else {
            json!(self.primitive.as_str())
        };
        property.insert("type".to_string(), type_value);
        property.insert("description".to_string(), json!(self.description));
        if let Some(allowed) = &self.allowed {
            property.insert("enum".to_string(), json!(allowed));
        }
        if let Some(default) = &self.default {
            property.insert("default".to_string(), default.clone());
        }
        if let Some(minimum) = self.minimum {
            property.insert("minimum".to_string(), json!(minimum));
        }
        if self.primitive == PrimitiveType::Integer {
            property.insert("maximum".to_string(), json!(i64::MAX));
        }
        Value::Object(property)
    }
}

/// A requirement that only applies when another parameter has a given value.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredIf {
    /// Parameter that becomes required.
    pub field: &'static str,
    /// Parameter whose value triggers the requirement.
    pub when: &'static str,
    /// Triggering value (compared after coercion).
    pub equals: Value,
}

/// Declared parameter contract of one tool.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolSchema {
    params: Vec<ParamSpec>,
    conditions: Vec<RequiredIf>,
}

impl ToolSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. Declaration order is preserved.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Make `field` required whenever `when` equals `equals`.
    pub fn required_if(mut self, field: &'static str, when: &'static str, equals: Value) -> Self {
        self.conditions.push(RequiredIf {
            field,
            when,
            equals,
        });
        self
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn conditions(&self) -> &[RequiredIf] {
        &self.conditions
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Render as a JSON Schema object for `tools/list`.
    pub fn to_json_schema(&self) -> JsonObject {
        let properties: serde_json::Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.to_json_schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required && p.default.is_none())
            .map(|p| p.name)
            .collect();

        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), json!(required));
        }
        if !self.conditions.is_empty() {
            let rules: Vec<Value> = self
                .conditions
                .iter()
                .map(|c| {
                    let mut trigger = serde_json::Map::new();
                    trigger.insert(c.when.to_string(), json!({ "const": c.equals }));
                    json!({
                        "if": {
                            "properties": Value::Object(trigger),
                            "required": [c.when]
                        },
                        "then": { "required": [c.field] }
                    })
                })
                .collect();
            schema.insert("allOf".to_string(), Value::Array(rules));
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ToolSchema {
        ToolSchema::new()
            .param(
                ParamSpec::string("mode", "Mode")
                    .required()
                    .one_of(&["a", "b"]),
            )
            .param(ParamSpec::string("term", "Term"))
            .param(
                ParamSpec::integer("qty", "Quantity")
                    .nullable()
                    .minimum(0.0)
                    .default_value(json!(0)),
            )
            .required_if("term", "mode", json!("a"))
    }

    #[test]
    fn test_param_order_preserved() {
        let schema = sample();
        let names: Vec<_> = schema.params().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["mode", "term", "qty"]);
        assert!(schema.get("qty").is_some());
        assert!(schema.get("missing").is_none());
    }

    #[test]
    fn test_json_schema_rendering() {
        let schema = sample().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["mode"]));
        assert_eq!(schema["properties"]["mode"]["enum"], json!(["a", "b"]));
        assert_eq!(schema["properties"]["qty"]["type"], json!(["integer", "null"]));
        assert_eq!(schema["properties"]["qty"]["default"], json!(0));
        assert_eq!(schema["properties"]["qty"]["minimum"], json!(0.0));
        assert_eq!(schema["properties"]["qty"]["maximum"], json!(i64::MAX));
        assert!(schema["properties"]["term"].get("maximum").is_none());
        assert_eq!(
            schema["allOf"][0]["then"]["required"],
            json!(["term"])
        );
        assert_eq!(
            schema["allOf"][0]["if"]["properties"]["mode"]["const"],
            json!("a")
        );
    }
}
