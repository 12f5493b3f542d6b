//! Error types for the DANDI SDK.

use serde_json::Value;

/// Result type for SDK operations.
pub type DandiResult<T> = Result<T, DandiError>;

/// Error types that can occur when talking to the archive API.
#[derive(Debug, thiserror::Error)]
pub enum DandiError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success response.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A success response whose body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A field the client depends on was missing from the response.
    #[error("{}", missing_field_message(.0))]
    MissingField(&'static str),
}

fn missing_field_message(field: &str) -> String {
    match field {
        "allowed_tables" => "no table list found".to_string(),
        other => format!("response is missing field `{}`", other),
    }
}

impl DandiError {
    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Create an API error from a status code and response body.
    ///
    /// The message comes from the body's `error` field, falling back to
    /// `detail`; `details` is kept as whatever JSON the API sent.
    pub fn from_response(status: u16, body: &str) -> Self {
        if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
            let message = ["error", "detail"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str));
            if let Some(message) = message {
                return Self::Api {
                    status,
                    message: message.to_string(),
                    details: fields.get("details").filter(|d| !d.is_null()).cloned(),
                };
            }
        }

        let message = if body.trim().is_empty() {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status))
        } else {
            body.to_string()
        };

        Self::Api {
            status,
            message,
            details: None,
        }
    }
}
