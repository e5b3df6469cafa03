use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A submitted form field, kept exactly as the transport typed it.
///
/// A field is filled when its value is truthy: `null`, `false`, `0` and `""` all leave it
/// missing, anything else (including whitespace, arrays and objects) is kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValue(Value);

impl FieldValue {
    pub fn from_value(value: &Value) -> Option<FieldValue> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(string) if string.is_empty() => None,
            Value::Number(number) if number.as_f64() == Some(0.0) => None,
            value => Some(FieldValue(value.clone())),
        }
    }

    #[cfg(test)]
    pub fn text(text: &str) -> FieldValue {
        FieldValue(Value::String(text.to_string()))
    }
}

/// Strings print bare, everything else prints as JSON.
impl Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Value::String(string) => f.write_str(string),
            value => write!(f, "{value}"),
        }
    }
}
