use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Malformed wire input for a single field.
    #[error("format error in `{field}`: {reason}")]
    Format { field: String, reason: String },
    #[error("json error: {0}")]
    Json(String),
    #[error("xml error: {0}")]
    Xml(String),
}

impl ModelError {
    pub fn format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format { field: field.into(), reason: reason.into() }
    }

    /// Qualify the field of a format error with its enclosing path, eg `attributes[2].datatype`.
    pub fn within(self, prefix: &str) -> Self {
        match self {
            Self::Format { field, reason } if field.is_empty() => Self::Format { field: prefix.to_string(), reason },
            Self::Format { field, reason } => Self::Format { field: format!("{prefix}.{field}"), reason },
            other => other,
        }
    }

    /// Field name carried by a format error.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Format { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            Self::Format { .. } => 2001,
            Self::Json(_) => 2002,
            Self::Xml(_) => 2003,
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self { Self::Json(e.to_string()) }
}
