//! Open311 GeoReport v2 resources and their wire codec.
//! - Entities are plain values; the codec owns field naming and order.
//! - JSON is the primary rendering, XML is available for every document.

pub mod errors;
pub mod naming;
pub mod temporal;
pub mod codec;
pub mod api_error;
pub mod service;
pub mod definition;
pub mod request;
pub mod input;

pub use api_error::{Error, Errors};
pub use codec::{ServiceRequests, WireDocument};
pub use definition::{ServiceAttribute, ServiceAttributeValue, ServiceAttributes, ServiceDefinition};
pub use errors::ModelError;
pub use input::{PostServiceRequestInput, SubmittedAttributes};
pub use naming::{AttributeDatatype, ServiceRequestStatus, ServiceType, WireToken};
pub use request::{ServiceRequest, ServiceRequestCreated, ServiceRequestToken};
pub use service::{Service, Services};

#[cfg(test)]
mod tests;
