//! State output domain types

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A named output of a workspace's current state version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputValue {
    pub name: String,
    pub value: JsonValue,
    pub sensitive: bool,
}

impl OutputValue {
    /// Renders a scalar value as plain text
    ///
    /// Strings are returned without quotes and numbers as their JSON text,
    /// so `123` becomes `"123"`. A missing or `null` value (how sensitive
    /// outputs are reported), an empty string, and any boolean, array or
    /// object yield `None`.
    pub fn value_as_string(&self) -> Option<String> {
        match &self.value {
            JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Finds the output with the given name
pub fn find_output<'a>(outputs: &'a [OutputValue], name: &str) -> Option<&'a OutputValue> {
    outputs.iter().find(|output| output.name == name)
}
