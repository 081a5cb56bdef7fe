//! Attribute validation: the pure engine plus the collaborator-facing validator.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use models::{PostServiceRequestInput, Service};

use crate::catalog::JurisdictionLookup;
use crate::errors::ServiceError;

pub mod engine;

pub use engine::validate;

/// One rejected attribute: the attribute code and a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub field: String,
    pub message: String,
}

impl ValidationResult {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Checks the attribute answers of a request against the service's definition.
#[async_trait]
pub trait AttributeValidator: Send + Sync {
    async fn validate_metadata(&self, service: &Service, input: &PostServiceRequestInput) -> Result<Vec<ValidationResult>, ServiceError>;
}

/// Validator that loads the definition from the jurisdiction's service store.
pub struct SchemaAttributeValidator<J: JurisdictionLookup> {
    jurisdictions: Arc<J>,
}

impl<J: JurisdictionLookup> SchemaAttributeValidator<J> {
    pub fn new(jurisdictions: Arc<J>) -> Self { Self { jurisdictions } }
}

#[async_trait]
impl<J: JurisdictionLookup> AttributeValidator for SchemaAttributeValidator<J> {
    #[instrument(skip(self, service, input), fields(service_code = service.code()))]
    async fn validate_metadata(&self, service: &Service, input: &PostServiceRequestInput) -> Result<Vec<ValidationResult>, ServiceError> {
        if !service.metadata {
            return Ok(Vec::new());
        }
        let store = self.jurisdictions.get_service_store(input.jurisdiction_id.as_deref()).await?;
        let schema = store.get_service_definition(service.code()).await?;
        Ok(validate(service, &schema, &input.attributes))
    }
}

/// Canned validators for tests and doc examples
pub mod mock {
    use super::*;

    /// Always answers with the same failures.
    #[derive(Default)]
    pub struct FixedAttributeValidator {
        pub failures: Vec<ValidationResult>,
    }

    #[async_trait]
    impl AttributeValidator for FixedAttributeValidator {
        async fn validate_metadata(&self, _service: &Service, _input: &PostServiceRequestInput) -> Result<Vec<ValidationResult>, ServiceError> {
            Ok(self.failures.clone())
        }
    }
}
