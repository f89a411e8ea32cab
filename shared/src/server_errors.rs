//! Structured validation errors carried in failed responses.
//!
//! The backend reports problems as `{"errors": {"field": ["msg", ...]}}`,
//! sometimes nested under `error`, or as a bare `{"message": "..."}`. Forms
//! use [`ServerErrors::field_messages`] to attach messages to their inputs.

use std::collections::BTreeMap;

use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerErrors {
    fields: BTreeMap<String, Vec<String>>,
    message: Option<String>,
}

impl ServerErrors {
    pub fn from_value(payload: &Value) -> Self {
        let fields = payload
            .get("errors")
            .filter(|value| value.is_object())
            .or_else(|| payload.get("error").and_then(|inner| inner.get("errors")))
            .and_then(Value::as_object)
            .map(|errors| {
                errors
                    .iter()
                    .map(|(field, value)| (field.clone(), messages_of(value)))
                    .collect()
            })
            .unwrap_or_default();

        let message = payload
            .get("message")
            .or_else(|| payload.get("error").and_then(|inner| inner.get("message")))
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            fields,
            message,
        }
    }

    pub fn field_messages(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    /// Messages for a single field joined for display, if the server flagged
    /// that field.
    pub fn for_field(&self, field: &str) -> Option<String> {
        self.fields.get(field).map(|messages| messages.join(", "))
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Flattened `field: m1, m2` lines. Falls back to the top-level message
    /// when no field errors were reported.
    pub fn messages(&self) -> Vec<String> {
        let lines: Vec<String> = self
            .fields
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
            .collect();
        if !lines.is_empty() {
            return lines;
        }
        self.message.iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.message.is_none()
    }
}

fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::String(text) => vec![text.clone()],
        other => vec![other.to_string()],
    }
}
