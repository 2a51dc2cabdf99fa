//! Argument validation against a `ToolSchema`.
//!
//! `validate` is a pure function of the schema and the raw arguments. It
//! never stops at the first problem: every violated constraint is collected
//! so the caller can correct all of them in a single retry.
//!
//! Coercion is deliberately narrow. Plain numeric strings (`"10.5"`) and the
//! usual boolean spellings are accepted; currency symbols, thousands
//! separators and locale decimals are not, and must be normalized by the
//! caller before the tool is invoked.

use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use super::error::ToolError;
use super::schema::{ParamSpec, PrimitiveType, ToolSchema};

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A required parameter was absent (or blank).
    Missing(String),
    /// The value could not be read as the declared primitive type.
    InvalidType(String),
    /// The value has the right type but is outside the allowed set or range.
    InvalidValue(String),
}

impl Violation {
    /// Name of the offending parameter.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing(f) | Self::InvalidType(f) | Self::InvalidValue(f) => f,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(name) => write!(f, "missing required field {}", name),
            Self::InvalidType(name) => write!(f, "invalid type for {}", name),
            Self::InvalidValue(name) => write!(f, "invalid value for {}", name),
        }
    }
}

/// Every violation found for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    violations: Vec<Violation>,
}

impl ValidationFailure {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether a violation names the given field.
    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field() == field)
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        f.write_str(&lines.join("; "))
    }
}

impl std::error::Error for ValidationFailure {}

/// Arguments that passed validation: declared parameters only, coerced to
/// their primitive types, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatedArgs {
    values: JsonObject,
}

impl ValidatedArgs {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn as_object(&self) -> &JsonObject {
        &self.values
    }

    /// Deserialize into the typed parameter record of `tool`.
    pub fn into_typed<T: DeserializeOwned>(self, tool: &'static str) -> Result<T, ToolError> {
        serde_json::from_value(Value::Object(self.values))
            .map_err(|e| ToolError::params_mismatch(tool, e))
    }
}

/// Validate raw arguments against a schema.
pub fn validate(schema: &ToolSchema, raw: &JsonObject) -> Result<ValidatedArgs, ValidationFailure> {
    let mut values = JsonObject::new();
    let mut violations = Vec::new();

    for spec in schema.params() {
        match check_param(spec, raw.get(spec.name)) {
            Ok(Some(value)) => {
                values.insert(spec.name.to_string(), value);
            }
            Ok(None) => {}
            Err(violation) => violations.push(violation),
        }
    }

    // Conditional requirements see post-coercion values, and never pile a
    // "missing" on top of a field that already failed.
    let reported: HashSet<String> = violations.iter().map(|v| v.field().to_string()).collect();
    for rule in schema.conditions() {
        let triggered = values.get(rule.when) == Some(&rule.equals);
        let present = values.get(rule.field).is_some_and(|v| !is_blank(v));
        if triggered && !present && !reported.contains(rule.field) {
            violations.push(Violation::Missing(rule.field.to_string()));
        }
    }

    for key in raw.keys() {
        if schema.get(key).is_none() {
            debug!("Ignoring undeclared argument '{}'", key);
        }
    }

    if violations.is_empty() {
        Ok(ValidatedArgs { values })
    } else {
        Err(ValidationFailure { violations })
    }
}

/// Check one parameter. `Ok(None)` means absent with nothing to fill in.
fn check_param(spec: &ParamSpec, raw: Option<&Value>) -> Result<Option<Value>, Violation> {
    let raw = match raw {
        Some(Value::Null) if spec.nullable => None,
        Some(Value::Null) if spec.required => None,
        Some(Value::Null) => return Err(Violation::InvalidType(spec.name.to_string())),
        other => other,
    };

    let Some(raw) = raw else {
        return match &spec.default {
            Some(default) => Ok(Some(default.clone())),
            None if spec.required => Err(Violation::Missing(spec.name.to_string())),
            None => Ok(None),
        };
    };

    let value = coerce(spec.primitive, raw)
        .ok_or_else(|| Violation::InvalidType(spec.name.to_string()))?;

    if spec.required && is_blank(&value) {
        return Err(Violation::Missing(spec.name.to_string()));
    }

    if let (Some(allowed), Some(text)) = (&spec.allowed, value.as_str()) {
        if !allowed.iter().any(|candidate| *candidate == text) {
            return Err(Violation::InvalidValue(spec.name.to_string()));
        }
    }

    if spec.primitive == PrimitiveType::Integer && value.as_i64().is_none() {
        return Err(Violation::InvalidValue(spec.name.to_string()));
    }

    if let (Some(minimum), Some(number)) = (spec.minimum, value.as_f64()) {
        if number < minimum {
            return Err(Violation::InvalidValue(spec.name.to_string()));
        }
    }

    Ok(Some(value))
}

fn is_blank(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.trim().is_empty())
}

/// Read `raw` as the given primitive type, or `None` on mismatch.
fn coerce(primitive: PrimitiveType, raw: &Value) -> Option<Value> {
    match primitive {
        PrimitiveType::String => raw.as_str().map(|s| Value::String(s.to_string())),
        PrimitiveType::Number => match raw {
            Value::Number(_) => Some(raw.clone()),
            Value::String(s) => parse_number(s),
            _ => None,
        },
        PrimitiveType::Integer => match raw {
            Value::Number(n) => integral(n),
            Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
            _ => None,
        },
        PrimitiveType::Boolean => match raw {
            Value::Bool(b) => Some(Value::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(Value::Bool(false)),
                Some(1) => Some(Value::Bool(true)),
                _ => None,
            },
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" => Some(Value::Bool(true)),
                "false" | "0" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
    }
}

fn parse_number(text: &str) -> Option<Value> {
    let text = text.trim();
    let plain = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !plain {
        return None;
    }
    let number = text.parse::<f64>().ok().filter(|n| n.is_finite())?;
    Number::from_f64(number).map(Value::Number)
}

fn integral(number: &Number) -> Option<Value> {
    if number.is_i64() || number.is_u64() {
        return Some(Value::Number(number.clone()));
    }
    let float = number.as_f64()?;
    if float.fract() != 0.0 {
        return None;
    }
    // Whole but outside i64 stays as-is; the range check reports it.
    if float >= i64::MIN as f64 && float < i64::MAX as f64 {
        Some(Value::from(float as i64))
    } else {
        Some(Value::Number(number.clone()))
    }
}
