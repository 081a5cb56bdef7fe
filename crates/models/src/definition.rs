//! Service definitions: the per-service schema of custom attributes.
//!
//! A definition is read-only once it leaves the catalog. Attributes are
//! consumed in `order` (stable, so equal orders keep declaration order), which
//! is both the display order and the order validation failures are reported in.

use std::collections::HashSet;

use serde_json::Value;

use crate::codec::fields::{self, elements};
use crate::codec::{wire_collection, wire_serde, WireDocument, WireReader, WireWriter};
use crate::errors::ModelError;
use crate::naming::AttributeDatatype;

/// One allowed answer of a list-typed attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceAttributeValue {
    /// Machine value submitted by clients.
    pub key: String,
    /// Display label.
    pub name: Option<String>,
}

impl ServiceAttributeValue {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self { key: key.into(), name: Some(name.into()) }
    }
}

impl WireDocument for ServiceAttributeValue {
    const ELEMENT: &'static str = elements::VALUE;

    fn encode(&self) -> Value {
        WireWriter::new()
            .text(fields::KEY, Some(&self.key))
            .text(fields::NAME, self.name.as_deref())
            .finish()
    }

    fn decode(value: &Value) -> Result<Self, ModelError> {
        let r = WireReader::new(value, Self::ELEMENT)?;
        Ok(Self { key: r.text(fields::KEY)?.unwrap_or_default(), name: r.text(fields::NAME)? })
    }
}

/// A custom question attached to a service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceAttribute {
    /// `true` for questions answered by the client; `false` for informational entries.
    pub variable: bool,
    pub code: String,
    pub datatype: AttributeDatatype,
    pub required: bool,
    pub datatype_description: Option<String>,
    pub order: i32,
    pub description: Option<String>,
    pub values: Vec<ServiceAttributeValue>,
}

impl ServiceAttribute {
    pub fn new(code: impl Into<String>, datatype: AttributeDatatype) -> Self {
        Self { variable: true, code: code.into(), datatype, ..Self::default() }
    }

    pub fn value(&self, key: &str) -> Option<&ServiceAttributeValue> { self.values.iter().find(|v| v.key == key) }

    /// Exact, case-sensitive membership in the declared value keys.
    pub fn accepts_key(&self, key: &str) -> bool { self.value(key).is_some() }

    /// Label used in client-facing messages: the description, else the code.
    pub fn label(&self) -> &str { self.description.as_deref().filter(|d| !d.is_empty()).unwrap_or(&self.code) }
}

impl WireDocument for ServiceAttribute {
    const ELEMENT: &'static str = elements::ATTRIBUTE;

    fn encode(&self) -> Value {
        WireWriter::new()
            .boolean(fields::VARIABLE, self.variable)
            .text(fields::CODE, Some(&self.code))
            .token(fields::DATATYPE, self.datatype)
            .boolean(fields::REQUIRED, self.required)
            .text(fields::DATATYPE_DESCRIPTION, self.datatype_description.as_deref())
            .integer(fields::ORDER, self.order)
            .text(fields::DESCRIPTION, self.description.as_deref())
            .items(fields::VALUES, &self.values)
            .finish()
    }

    fn decode(value: &Value) -> Result<Self, ModelError> {
        let r = WireReader::new(value, Self::ELEMENT)?;
        Ok(Self {
            variable: r.boolean(fields::VARIABLE)?,
            code: r.text(fields::CODE)?.unwrap_or_default(),
            datatype: r.token(fields::DATATYPE)?,
            required: r.boolean(fields::REQUIRED)?,
            datatype_description: r.text(fields::DATATYPE_DESCRIPTION)?,
            order: r.integer(fields::ORDER)?,
            description: r.text(fields::DESCRIPTION)?,
            values: r.items(fields::VALUES)?,
        })
    }
}

wire_collection!(
    /// Attributes of a service definition, in declaration order.
    ServiceAttributes,
    ServiceAttribute,
    fields::ATTRIBUTES
);

/// The attribute schema of one service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceDefinition {
    pub service_code: String,
    pub attributes: ServiceAttributes,
}

impl ServiceDefinition {
    pub fn new(service_code: impl Into<String>, attributes: impl Into<ServiceAttributes>) -> Self {
        Self { service_code: service_code.into(), attributes: attributes.into() }
    }

    /// Attributes sorted by `order`; ties keep declaration order.
    pub fn ordered_attributes(&self) -> Vec<&ServiceAttribute> {
        let mut ordered: Vec<&ServiceAttribute> = self.attributes.iter().collect();
        ordered.sort_by_key(|a| a.order);
        ordered
    }

    /// Client-answered attributes, in validation order.
    pub fn variable_attributes(&self) -> impl Iterator<Item = &ServiceAttribute> {
        self.ordered_attributes().into_iter().filter(|a| a.variable)
    }

    pub fn attribute(&self, code: &str) -> Option<&ServiceAttribute> { self.attributes.iter().find(|a| a.code == code) }

    /// Reports the first schema defect: a list datatype without values, a
    /// repeated attribute code, or a repeated value key within an attribute.
    pub fn check_consistency(&self) -> Result<(), ModelError> {
        let mut codes = HashSet::new();
        for (i, attr) in self.attributes.iter().enumerate() {
            let path = format!("{}[{i}]", fields::ATTRIBUTES);
            if !codes.insert(attr.code.as_str()) {
                return Err(ModelError::format(format!("{path}.{}", fields::CODE), format!("duplicate attribute code `{}`", attr.code)));
            }
            if attr.datatype.is_list() && attr.values.is_empty() {
                return Err(ModelError::format(format!("{path}.{}", fields::VALUES), format!("{} attribute declares no values", attr.datatype)));
            }
            let mut keys = HashSet::new();
            if let Some(dup) = attr.values.iter().find(|v| !keys.insert(v.key.as_str())) {
                return Err(ModelError::format(format!("{path}.{}", fields::VALUES), format!("duplicate value key `{}`", dup.key)));
            }
        }
        Ok(())
    }
}

impl WireDocument for ServiceDefinition {
    const ELEMENT: &'static str = elements::SERVICE_DEFINITION;

    fn encode(&self) -> Value {
        WireWriter::new()
            .text(fields::SERVICE_CODE, Some(&self.service_code))
            .items(fields::ATTRIBUTES, &self.attributes)
            .finish()
    }

    fn decode(value: &Value) -> Result<Self, ModelError> {
        let r = WireReader::new(value, Self::ELEMENT)?;
        Ok(Self {
            service_code: r.text(fields::SERVICE_CODE)?.unwrap_or_default(),
            attributes: ServiceAttributes::from(r.items::<ServiceAttribute>(fields::ATTRIBUTES)?),
        })
    }
}

wire_serde!(ServiceAttributeValue, ServiceAttribute, ServiceDefinition);
