use serde_json::Value;

use crate::codec::fields::{self, elements};
use crate::codec::{wire_collection, wire_serde, WireDocument, WireReader, WireWriter};
use crate::errors::ModelError;
use crate::naming::ServiceType;

/// A request type offered by a jurisdiction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Service {
    pub service_code: Option<String>,
    pub service_name: Option<String>,
    pub description: Option<String>,
    /// Whether the service declares custom attributes in a service definition.
    pub metadata: bool,
    pub service_type: ServiceType,
    pub keywords: Vec<String>,
    pub group: Option<String>,
}

impl Service {
    pub fn new(service_code: impl Into<String>) -> Self {
        Self { service_code: Some(service_code.into()), ..Self::default() }
    }

    pub fn code(&self) -> &str { self.service_code.as_deref().unwrap_or_default() }
}

/// Keywords travel as one comma-separated string. An empty list is `null`.
fn join_keywords(keywords: &[String]) -> Option<String> {
    (!keywords.is_empty()).then(|| keywords.join(","))
}

/// `null` and `""` both decode to no keywords.
fn split_keywords(raw: Option<String>) -> Vec<String> {
    raw.filter(|s| !s.is_empty())
        .map(|s| s.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

impl WireDocument for Service {
    const ELEMENT: &'static str = elements::SERVICE;

    fn encode(&self) -> Value {
        WireWriter::new()
            .text(fields::SERVICE_CODE, self.service_code.as_deref())
            .text(fields::SERVICE_NAME, self.service_name.as_deref())
            .text(fields::DESCRIPTION, self.description.as_deref())
            .boolean(fields::METADATA, self.metadata)
            .token(fields::TYPE, self.service_type)
            .text(fields::KEYWORDS, join_keywords(&self.keywords).as_deref())
            .text(fields::GROUP, self.group.as_deref())
            .finish()
    }

    fn decode(value: &Value) -> Result<Self, ModelError> {
        let r = WireReader::new(value, Self::ELEMENT)?;
        Ok(Self {
            service_code: r.text(fields::SERVICE_CODE)?,
            service_name: r.text(fields::SERVICE_NAME)?,
            description: r.text(fields::DESCRIPTION)?,
            metadata: r.boolean(fields::METADATA)?,
            service_type: r.token(fields::TYPE)?,
            keywords: split_keywords(r.text(fields::KEYWORDS)?),
            group: r.text(fields::GROUP)?,
        })
    }
}

wire_serde!(Service);

wire_collection!(
    /// Service catalog response body.
    Services,
    Service,
    elements::SERVICES
);
