//! Error types for enum field configuration

use thiserror::Error;

/// Result type for enum field operations
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors raised while configuring an enum field.
///
/// Rendering never produces an error: every anomaly found while formatting a
/// value degrades to a plain label or the `secondary` badge instead.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A configuration method received an argument it cannot accept.
    #[error("{message}")]
    InvalidConfiguration {
        /// Fully qualified name of the method that rejected the argument,
        /// e.g. `EnumField::render_as_badges`.
        method: &'static str,
        message: String,
    },

    /// A declarative field definition could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl FieldError {
    pub(crate) fn invalid(method: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            method,
            message: message.into(),
        }
    }

    /// Name of the method that rejected its argument, if this is a
    /// configuration error.
    pub fn method(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfiguration { method, .. } => Some(method),
            Self::Yaml(_) => None,
        }
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }
}

/// Type name of a dynamic configuration value, as reported in
/// `InvalidConfiguration` messages.
pub(crate) fn shape_of(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "NULL",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "double",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) | Value::Object(_) => "array",
    }
}
