use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::{
    PostServiceRequestInput, ServiceRequest, ServiceRequestCreated, ServiceRequestStatus, ServiceRequestToken,
    ServiceRequests,
};

use crate::catalog::JurisdictionLookup;
use crate::errors::ServiceError;
use crate::requests::ServiceRequestRepository;
use crate::validation::{AttributeValidator, ValidationResult};

pub const LOCATION_REQUIRED: &str = "a location is required: lat/long, address_string or address_id";

/// Request intake independent of any transport
pub struct RequestIntake<J: JurisdictionLookup, V: AttributeValidator, R: ServiceRequestRepository> {
    jurisdictions: Arc<J>,
    validator: Arc<V>,
    repo: Arc<R>,
}

impl<J, V, R> RequestIntake<J, V, R>
where
    J: JurisdictionLookup,
    V: AttributeValidator,
    R: ServiceRequestRepository,
{
    pub fn new(jurisdictions: Arc<J>, validator: Arc<V>, repo: Arc<R>) -> Self {
        Self { jurisdictions, validator, repo }
    }

    /// Accept a new service request.
    ///
    /// # Examples
    /// ```
    /// use service::catalog::memory::{InMemoryJurisdictions, InMemoryServiceStore};
    /// use service::intake::RequestIntake;
    /// use service::requests::memory::InMemoryServiceRequestRepository;
    /// use service::validation::SchemaAttributeValidator;
    /// use models::{PostServiceRequestInput, Service};
    /// use std::sync::Arc;
    /// let store = InMemoryServiceStore::default().with_service(Service::new("GRAF"), None);
    /// let routes = Arc::new(InMemoryJurisdictions::default().with_store("city", store));
    /// let intake = RequestIntake::new(
    ///     routes.clone(),
    ///     Arc::new(SchemaAttributeValidator::new(routes)),
    ///     Arc::new(InMemoryServiceRequestRepository::default()),
    /// );
    /// let input = PostServiceRequestInput {
    ///     jurisdiction_id: Some("city".into()),
    ///     address_string: Some("1 Main St".into()),
    ///     ..PostServiceRequestInput::new("GRAF")
    /// };
    /// let created = tokio_test::block_on(intake.submit(input)).unwrap();
    /// assert_eq!(created[0].service_request_id.as_deref(), Some("1"));
    /// ```
    #[instrument(skip(self, input), fields(jurisdiction_id = ?input.jurisdiction_id, service_code = %input.service_code))]
    pub async fn submit(&self, input: PostServiceRequestInput) -> Result<ServiceRequests<ServiceRequestCreated>, ServiceError> {
        let jurisdiction = self.jurisdictions.resolve_id(input.jurisdiction_id.as_deref())?.to_string();
        let store = self.jurisdictions.get_service_store(Some(&jurisdiction)).await?;
        let service = store.get_service(&input.service_code).await?;

        if !input.has_location() {
            debug!(event = "location_missing");
            return Err(ServiceError::Validation(vec![ValidationResult::new("location", LOCATION_REQUIRED)]));
        }

        let failures = self.validator.validate_metadata(&service, &input).await?;
        if !failures.is_empty() {
            debug!(event = "request_rejected", failures = failures.len());
            return Err(ServiceError::Validation(failures));
        }

        let mut request = ServiceRequest::new();
        request.status = ServiceRequestStatus::Open;
        request.service_code = service.service_code.clone();
        request.service_name = service.service_name.clone();
        request.description = input.description.clone();
        request.address = input.address_string.clone();
        request.address_id = input.address_id.clone();
        request.lat = input.lat;
        request.long = input.long;
        request.media_url = input.media_url.clone();

        let created = self.repo.create(&jurisdiction, request, &input).await?;
        info!(
            event = "request_accepted",
            service_request_id = ?created.service_request_id,
            service_code = %input.service_code
        );
        Ok(ServiceRequests::single(created))
    }

    /// Look up the request id issued for a token within the jurisdiction.
    #[instrument(skip(self))]
    pub async fn token(&self, jurisdiction_id: Option<&str>, token: &str) -> Result<ServiceRequests<ServiceRequestToken>, ServiceError> {
        let jurisdiction = self.jurisdictions.resolve_id(jurisdiction_id)?;
        self.jurisdictions.get_service_store(Some(jurisdiction)).await?;
        Ok(ServiceRequests::single(self.repo.find_by_token(jurisdiction, token).await?))
    }

    /// Fetch a single request by id within the jurisdiction.
    #[instrument(skip(self))]
    pub async fn request(&self, jurisdiction_id: Option<&str>, service_request_id: &str) -> Result<ServiceRequests<ServiceRequest>, ServiceError> {
        let jurisdiction = self.jurisdictions.resolve_id(jurisdiction_id)?;
        self.jurisdictions.get_service_store(Some(jurisdiction)).await?;
        Ok(ServiceRequests::single(self.repo.get(jurisdiction, service_request_id).await?))
    }
}
