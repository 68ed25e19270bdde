//! Error types for record generation

use thiserror::Error;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Generation errors
///
/// Generation is all-or-nothing: any of these aborts the whole run.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Failed to generate definition `{name}`: {source}")]
    Definition {
        name: String,
        #[source]
        source: MalformedSchema,
    },

    #[error("Invalid schema document: {0}")]
    InvalidDocument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

impl GenerateError {
    /// Name of the definition that caused the failure, if any
    pub fn definition_name(&self) -> Option<&str> {
        match self {
            GenerateError::Definition { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Structural problem inside a single definition.
///
/// `path` is a JSON pointer relative to the definition root, e.g. `/allOf/1/properties`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedSchema {
    #[error("expected {expected} at `{path}`, found {found}")]
    UnexpectedType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl MalformedSchema {
    pub(crate) fn unexpected(path: &str, expected: &'static str, found: &serde_json::Value) -> Self {
        MalformedSchema::UnexpectedType {
            path: if path.is_empty() { "/".to_string() } else { path.to_string() },
            expected,
            found: json_kind(found),
        }
    }
}

/// Human-readable JSON kind for error messages
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
