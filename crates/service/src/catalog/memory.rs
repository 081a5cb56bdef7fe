use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use configs::JurisdictionConfig;
use models::{Service, ServiceDefinition, Services};

use super::{validate_jurisdiction_id, JurisdictionLookup, ServiceStore};
use crate::errors::ServiceError;

/// Catalog held in memory, in insertion order.
#[derive(Default)]
pub struct InMemoryServiceStore {
    services: Vec<Service>,
    definitions: HashMap<String, ServiceDefinition>,
}

impl InMemoryServiceStore {
    /// Add a service, with its definition when it carries metadata.
    pub fn with_service(mut self, service: Service, definition: Option<ServiceDefinition>) -> Self {
        if let Some(definition) = definition {
            self.definitions.insert(service.code().to_string(), definition);
        }
        self.services.push(service);
        self
    }
}

#[async_trait]
impl ServiceStore for InMemoryServiceStore {
    async fn get_services(&self) -> Result<Services, ServiceError> {
        Ok(self.services.iter().cloned().collect())
    }

    async fn get_service(&self, service_code: &str) -> Result<Service, ServiceError> {
        self.services
            .iter()
            .find(|s| s.code() == service_code)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(&format!("service `{service_code}`")))
    }

    async fn get_service_definition(&self, service_code: &str) -> Result<ServiceDefinition, ServiceError> {
        self.definitions
            .get(service_code)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(&format!("service definition `{service_code}`")))
    }
}

/// Jurisdiction id -> store routing, guarded by the configured id rules.
#[derive(Default)]
pub struct InMemoryJurisdictions {
    stores: HashMap<String, Arc<dyn ServiceStore>>,
    reserved_prefixes: Vec<String>,
    default_id: Option<String>,
}

impl InMemoryJurisdictions {
    pub fn from_config(cfg: &JurisdictionConfig) -> Self {
        Self { stores: HashMap::new(), reserved_prefixes: cfg.reserved_prefixes.clone(), default_id: cfg.default_id.clone() }
    }

    pub fn with_store(mut self, jurisdiction_id: impl Into<String>, store: impl ServiceStore + 'static) -> Self {
        self.stores.insert(jurisdiction_id.into(), Arc::new(store));
        self
    }
}

#[async_trait]
impl JurisdictionLookup for InMemoryJurisdictions {
    fn resolve_id<'a>(&'a self, jurisdiction_id: Option<&'a str>) -> Result<&'a str, ServiceError> {
        let id = jurisdiction_id
            .or(self.default_id.as_deref())
            .ok_or_else(|| ServiceError::not_found("jurisdiction_id"))?;
        validate_jurisdiction_id(id, &self.reserved_prefixes)
    }

    async fn get_service_store(&self, jurisdiction_id: Option<&str>) -> Result<Arc<dyn ServiceStore>, ServiceError> {
        let id = self.resolve_id(jurisdiction_id)?;
        debug!(jurisdiction_id = %id, "resolve_service_store");
        self.stores
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(&format!("jurisdiction `{id}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::ServiceAttribute;

    fn store() -> InMemoryServiceStore {
        InMemoryServiceStore::default()
            .with_service(Service::new("A"), None)
            .with_service(Service { metadata: true, ..Service::new("B") }, Some(ServiceDefinition::new("B", Vec::<ServiceAttribute>::new())))
    }

    #[tokio::test]
    async fn store_lookups() -> Result<(), ServiceError> {
        let store = store();
        let codes: Vec<String> = store.get_services().await?.iter().map(|s| s.code().to_string()).collect();
        assert_eq!(codes, vec!["A", "B"]);
        assert_eq!(store.get_service("B").await?.code(), "B");
        assert_eq!(store.get_service_definition("B").await?.service_code, "B");
        assert!(matches!(store.get_service("Z").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.get_service_definition("A").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn routing_honors_default_and_reserved_prefixes() -> Result<(), ServiceError> {
        let cfg = JurisdictionConfig { reserved_prefixes: vec!["invalid".into()], default_id: Some("city".into()) };
        let routes = InMemoryJurisdictions::from_config(&cfg).with_store("city", store()).with_store("invalid-town", store());

        assert_eq!(routes.resolve_id(None)?, "city");
        assert_eq!(routes.resolve_id(Some("other"))?, "other");
        assert_eq!(routes.get_service_store(None).await?.get_services().await?.len(), 2);
        assert!(routes.get_service_store(Some("city")).await.is_ok());
        assert!(matches!(routes.get_service_store(Some("invalid-town")).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(routes.get_service_store(Some("nowhere")).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn missing_id_without_default_is_not_found() {
        let routes = InMemoryJurisdictions::default().with_store("city", store());
        assert!(matches!(routes.get_service_store(None).await, Err(ServiceError::NotFound(_))));
    }
}
