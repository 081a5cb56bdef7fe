use thiserror::Error;

use models::{Error as WireError, Errors};

use crate::validation::ValidationResult;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<ValidationResult>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("collaborator error: {0}")]
    Collaborator(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

fn summarize(failures: &[ValidationResult]) -> String {
    failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::NotFound(_) => 1003,
            ServiceError::Collaborator(_) => 1200,
            ServiceError::Model(e) => e.code(),
        }
    }

    /// HTTP-style status carried in each wire error entry.
    pub fn status(&self) -> i32 {
        match self {
            ServiceError::Validation(_) | ServiceError::Model(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Collaborator(_) => 500,
        }
    }

    /// Client-facing error body. Validation failures yield one entry per failed
    /// field, in validation order.
    pub fn to_errors(&self) -> Errors {
        match self {
            ServiceError::Validation(failures) => failures
                .iter()
                .map(|f| WireError::new(self.status(), f.to_string()))
                .collect(),
            other => Errors::from(vec![WireError::new(other.status(), other.to_string())]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::ModelError;

    #[test]
    fn validation_renders_one_error_per_field() {
        let err = ServiceError::Validation(vec![
            ValidationResult::new("SIZE", "Size is required"),
            ValidationResult::new("COLOR", "invalid value"),
        ]);
        let errors = err.to_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, 400);
        assert_eq!(errors[0].description.as_deref(), Some("SIZE: Size is required"));
        assert_eq!(errors[1].description.as_deref(), Some("COLOR: invalid value"));
        assert_eq!(err.code(), 1001);
    }

    #[test]
    fn other_errors_render_a_single_entry() {
        let errors = ServiceError::not_found("service `X`").to_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, 404);
        assert_eq!(errors[0].description.as_deref(), Some("not found: service `X` not found"));

        let errors = ServiceError::from(ModelError::format("lat", "bad")).to_errors();
        assert_eq!(errors[0].code, 400);
        assert_eq!(ServiceError::Collaborator("down".into()).to_errors()[0].code, 500);
    }
}
