//! Catalog collaborators: jurisdiction routing and per-jurisdiction service stores.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use models::{Service, ServiceDefinition, Services};

use crate::errors::ServiceError;

pub mod memory;

/// Resolves the service store owning a jurisdiction.
#[async_trait]
pub trait JurisdictionLookup: Send + Sync {
    /// The jurisdiction a call is answered for. `None` selects the
    /// deployment's default jurisdiction, if one is configured.
    fn resolve_id<'a>(&'a self, jurisdiction_id: Option<&'a str>) -> Result<&'a str, ServiceError>;

    /// Store of the jurisdiction named as in [`JurisdictionLookup::resolve_id`].
    async fn get_service_store(&self, jurisdiction_id: Option<&str>) -> Result<Arc<dyn ServiceStore>, ServiceError>;
}

/// Read access to one jurisdiction's catalog.
#[async_trait]
pub trait ServiceStore: Send + Sync {
    async fn get_services(&self) -> Result<Services, ServiceError>;
    async fn get_service(&self, service_code: &str) -> Result<Service, ServiceError>;
    async fn get_service_definition(&self, service_code: &str) -> Result<ServiceDefinition, ServiceError>;
}

/// Reject identifiers that can never name a jurisdiction: empty, characters
/// outside `[A-Za-z0-9._-]`, or starting with a reserved prefix (any case).
pub fn validate_jurisdiction_id<'a>(id: &'a str, reserved_prefixes: &[String]) -> Result<&'a str, ServiceError> {
    let lower = id.to_ascii_lowercase();
    let reason = if id.is_empty() {
        Some("empty")
    } else if !id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')) {
        Some("disallowed characters")
    } else if reserved_prefixes.iter().any(|p| lower.starts_with(p.to_ascii_lowercase().as_str())) {
        Some("reserved prefix")
    } else {
        None
    };
    match reason {
        Some(reason) => {
            warn!(event = "jurisdiction_rejected", jurisdiction_id = %id, reason);
            Err(ServiceError::not_found(&format!("jurisdiction `{id}`")))
        }
        None => Ok(id),
    }
}
