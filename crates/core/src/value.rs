//! Candidate values checked for uniqueness.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::CoreError;

/// A value bound as the first parameter of the count query.
///
/// Deserializes untagged from JSON scalars. JSON strings always land in
/// `Text`; build `Uuid` explicitly for `uuid` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// Bound as SQL `NULL`; `column = NULL` matches no rows.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
}

impl RuleValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RuleValue::Null)
    }

    /// Short type label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            RuleValue::Null => "null",
            RuleValue::Bool(_) => "bool",
            RuleValue::Int(_) => "int",
            RuleValue::Float(_) => "float",
            RuleValue::Uuid(_) => "uuid",
            RuleValue::Text(_) => "text",
        }
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        RuleValue::Text(value.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(value: String) -> Self {
        RuleValue::Text(value)
    }
}

impl From<i32> for RuleValue {
    fn from(value: i32) -> Self {
        RuleValue::Int(i64::from(value))
    }
}

impl From<i64> for RuleValue {
    fn from(value: i64) -> Self {
        RuleValue::Int(value)
    }
}

impl From<bool> for RuleValue {
    fn from(value: bool) -> Self {
        RuleValue::Bool(value)
    }
}

impl From<f64> for RuleValue {
    fn from(value: f64) -> Self {
        RuleValue::Float(value)
    }
}

impl From<Uuid> for RuleValue {
    fn from(value: Uuid) -> Self {
        RuleValue::Uuid(value)
    }
}

impl<T: Into<RuleValue>> From<Option<T>> for RuleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RuleValue::Null, Into::into)
    }
}

impl TryFrom<Value> for RuleValue {
    type Error = CoreError;

    /// Map a JSON scalar onto a bindable value. Arrays and objects have no
    /// single-column equivalent and are rejected.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(RuleValue::Null),
            Value::Bool(b) => Ok(RuleValue::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(RuleValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(RuleValue::Float(f))
                } else {
                    Err(CoreError::Validation(format!(
                        "Number {n} cannot be represented as i64 or f64"
                    )))
                }
            }
            Value::String(s) => Ok(RuleValue::Text(s)),
            Value::Array(_) | Value::Object(_) => Err(CoreError::Validation(
                "Unique check value must be a scalar, not an array or object".to_string(),
            )),
        }
    }
}
