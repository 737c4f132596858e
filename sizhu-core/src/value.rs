//! Runtime values passed through the function registry
//!
//! Values can be numbers, text, booleans, charts, objects, lists, null, or
//! errors. Structured results travel as objects built through the serde
//! bridge (`Value::from_serialize`), so every typed result has a dynamic
//! form without hand-written conversions.

use crate::{ChartResult, SizhuError};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Largest integer an f64 holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Runtime value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Number(f64),
    Text(String),
    Bool(bool),
    Chart(Box<ChartResult>),
    Object(HashMap<String, Value>),
    List(Vec<Value>),
    Null,
    Error(SizhuError),
}

impl Value {
    // ========== Safe Accessors (never panic) ==========

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_chart(&self) -> Option<&ChartResult> {
        match self {
            Value::Chart(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    // ========== Object Field Access ==========

    /// Get field from object. Returns Error value if not found or not an object.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Object(map) => map
                .get(key)
                .cloned()
                .unwrap_or_else(|| Value::Error(SizhuError::undefined_field(key))),
            Value::Error(e) => Value::Error(e.clone()),
            _ => Value::Error(SizhuError::type_error("Object", self.type_name())),
        }
    }

    /// Type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Text(_) => "Text",
            Value::Bool(_) => "Bool",
            Value::Chart(_) => "Chart",
            Value::Object(_) => "Object",
            Value::List(_) => "List",
            Value::Null => "Null",
            Value::Error(_) => "Error",
        }
    }

    // ========== Conversions ==========

    /// Interpret this value as a chart.
    ///
    /// Accepts a `Chart`, a JSON-shaped `Object` with year/month/day/hour
    /// pillars, or `Text` holding four pillars such as "甲子 丙寅 戊辰 庚午".
    pub fn to_chart(&self) -> Result<ChartResult, SizhuError> {
        match self {
            Value::Chart(c) => Ok(c.as_ref().clone()),
            Value::Object(_) => {
                let json = self.to_json()?;
                serde_json::from_value(json).map_err(|e| SizhuError::invalid_chart(e.to_string()))
            }
            Value::Text(s) => {
                let parts: Vec<&str> = s.split_whitespace().collect();
                if parts.len() != 4 {
                    return Err(SizhuError::invalid_chart(format!(
                        "expected 4 pillars, got {}",
                        parts.len()
                    )));
                }
                Ok(ChartResult::parse(parts[0], parts[1], parts[2], parts[3])?)
            }
            Value::Error(e) => Err(e.clone()),
            _ => Err(SizhuError::type_error("Chart", self.type_name())),
        }
    }

    /// Convert to plain JSON. Errors inside the value are returned as `Err`.
    pub fn to_json(&self) -> Result<JsonValue, SizhuError> {
        Ok(match self {
            // Whole numbers go out as integers so counts deserialise as usize
            Value::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                JsonValue::from(*n as i64)
            }
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Chart(c) => serde_json::to_value(c.as_ref())?,
            Value::Object(map) => {
                let mut out = serde_json::Map::new();
                for (k, v) in map {
                    out.insert(k.clone(), v.to_json()?);
                }
                JsonValue::Object(out)
            }
            Value::List(items) => {
                JsonValue::Array(items.iter().map(Value::to_json).collect::<Result<_, _>>()?)
            }
            Value::Null => JsonValue::Null,
            Value::Error(e) => return Err(e.clone()),
        })
    }

    /// Dynamic form of any serialisable result
    pub fn from_serialize<T: Serialize>(value: &T) -> Value {
        match serde_json::to_value(value) {
            Ok(json) => Value::from(json),
            Err(e) => Value::Error(SizhuError::internal(e.to_string())),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Chart(c) => write!(f, "{} {} {} {}", c.year, c.month, c.day, c.hour),
            Value::Object(obj) => write!(f, "[Object: {} fields]", obj.len()),
            Value::List(items) => {
                // Show values for small lists, count for large
                if items.len() <= 5 {
                    let contents: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                    write!(f, "[{}]", contents.join(", "))
                } else {
                    write!(f, "[{}]", items.len())
                }
            }
            Value::Null => write!(f, "null"),
            Value::Error(e) => write!(f, "#ERROR: {}", e.code),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            JsonValue::String(s) => Value::Text(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<ChartResult> for Value {
    fn from(c: ChartResult) -> Self {
        Value::Chart(Box::new(c))
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::List(values.into_iter().map(Value::Number).collect())
    }
}
