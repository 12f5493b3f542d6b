//! Uniform wrapper returned for every tool invocation.

use dandi_sdk::SearchPage;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    /// Wrap a search page; `noun` is the plural shown in the message.
    pub fn search(page: SearchPage, noun: &str) -> Self {
        Self {
            success: true,
            message: Some(format!("Found {} {}", page.count, noun)),
            total: Some(page.count),
            results: Some(page.results),
            error: None,
        }
    }

    /// `"<operation> failed: <reason>"`
    pub fn failure(operation: &str, reason: impl Display) -> Self {
        Self {
            success: false,
            error: Some(format!("{} failed: {}", operation, reason)),
            ..Default::default()
        }
    }

    pub fn into_value(self) -> Value {
        // A struct of strings, numbers and JSON values always serializes.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// True when a tool result carries `"success": false`.
pub fn is_failure(value: &Value) -> bool {
    value.get("success").and_then(Value::as_bool) == Some(false)
}
