//! Persistence boundary for accepted service requests.

use async_trait::async_trait;

use models::{PostServiceRequestInput, ServiceRequest, ServiceRequestCreated, ServiceRequestToken};

use crate::errors::ServiceError;

/// Stores accepted requests and answers lookups by id or token. Every call
/// is scoped to one jurisdiction; a request is invisible from any other.
#[async_trait]
pub trait ServiceRequestRepository: Send + Sync {
    async fn create(&self, jurisdiction_id: &str, request: ServiceRequest, input: &PostServiceRequestInput) -> Result<ServiceRequestCreated, ServiceError>;
    async fn get(&self, jurisdiction_id: &str, service_request_id: &str) -> Result<ServiceRequest, ServiceError>;
    async fn find_by_token(&self, jurisdiction_id: &str, token: &str) -> Result<ServiceRequestToken, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct Inner {
        next_id: u64,
        requests: HashMap<(String, String), ServiceRequest>, // key: (jurisdiction_id, service_request_id)
        tokens: HashMap<(String, String), String>,           // key: (jurisdiction_id, token)
    }

    #[derive(Default)]
    pub struct InMemoryServiceRequestRepository {
        inner: Mutex<Inner>,
    }

    impl InMemoryServiceRequestRepository {
        fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, ServiceError> {
            self.inner.lock().map_err(|e| ServiceError::Collaborator(e.to_string()))
        }
    }

    #[async_trait]
    impl ServiceRequestRepository for InMemoryServiceRequestRepository {
        async fn create(&self, jurisdiction_id: &str, mut request: ServiceRequest, input: &PostServiceRequestInput) -> Result<ServiceRequestCreated, ServiceError> {
            let mut inner = self.lock()?;
            inner.next_id += 1;
            let id = inner.next_id.to_string();
            let token = Uuid::new_v4().to_string();
            request.service_request_id = Some(id.clone());
            let created = ServiceRequestCreated {
                service_request_id: Some(id.clone()),
                token: Some(token.clone()),
                service_notice: request.service_notice.clone(),
                account_id: input.account_id.clone(),
            };
            inner.tokens.insert((jurisdiction_id.to_string(), token), id.clone());
            inner.requests.insert((jurisdiction_id.to_string(), id), request);
            Ok(created)
        }

        async fn get(&self, jurisdiction_id: &str, service_request_id: &str) -> Result<ServiceRequest, ServiceError> {
            self.lock()?
                .requests
                .get(&(jurisdiction_id.to_string(), service_request_id.to_string()))
                .cloned()
                .ok_or_else(|| ServiceError::not_found(&format!("service request `{service_request_id}`")))
        }

        async fn find_by_token(&self, jurisdiction_id: &str, token: &str) -> Result<ServiceRequestToken, ServiceError> {
            let inner = self.lock()?;
            let id = inner
                .tokens
                .get(&(jurisdiction_id.to_string(), token.to_string()))
                .ok_or_else(|| ServiceError::not_found(&format!("token `{token}`")))?;
            Ok(ServiceRequestToken { service_request_id: Some(id.clone()), token: Some(token.to_string()) })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn ids_are_sequential_and_tokens_resolve() -> Result<(), ServiceError> {
            let repo = InMemoryServiceRequestRepository::default();
            let input = PostServiceRequestInput { account_id: Some("acct-9".into()), ..PostServiceRequestInput::new("POT") };

            let first = repo.create("city", ServiceRequest::new(), &input).await?;
            let second = repo.create("city", ServiceRequest::new(), &input).await?;
            assert_eq!(first.service_request_id.as_deref(), Some("1"));
            assert_eq!(second.service_request_id.as_deref(), Some("2"));
            assert_eq!(first.account_id.as_deref(), Some("acct-9"));
            assert_ne!(first.token, second.token);

            let token = second.token.clone().unwrap_or_default();
            let found = repo.find_by_token("city", &token).await?;
            assert_eq!(found.service_request_id.as_deref(), Some("2"));
            assert_eq!(repo.get("city", "2").await?.service_request_id.as_deref(), Some("2"));
            Ok(())
        }

        #[tokio::test]
        async fn lookups_stay_inside_their_jurisdiction() -> Result<(), ServiceError> {
            let repo = InMemoryServiceRequestRepository::default();
            let created = repo.create("a", ServiceRequest::new(), &PostServiceRequestInput::new("POT")).await?;
            let token = created.token.clone().unwrap_or_default();

            assert!(repo.get("a", "1").await.is_ok());
            assert!(matches!(repo.get("b", "1").await, Err(ServiceError::NotFound(_))));
            assert!(matches!(repo.find_by_token("b", &token).await, Err(ServiceError::NotFound(_))));
            Ok(())
        }

        #[tokio::test]
        async fn unknown_lookups_are_not_found() {
            let repo = InMemoryServiceRequestRepository::default();
            assert!(matches!(repo.get("city", "1").await, Err(ServiceError::NotFound(_))));
            assert!(matches!(repo.find_by_token("city", "nope").await, Err(ServiceError::NotFound(_))));
        }
    }
}
