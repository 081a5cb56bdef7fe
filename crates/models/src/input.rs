//! Inbound arguments of a "create service request" call.

use std::collections::BTreeMap;

use serde_json::Value;
use url::Url;

use crate::errors::ModelError;

const ATTRIBUTE_PREFIX: &str = "attribute[";

/// Raw attribute answers keyed by attribute code, values in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedAttributes(BTreeMap<String, Vec<String>>);

impl SubmittedAttributes {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, code: &str) -> Option<&[String]> { self.0.get(code).map(Vec::as_slice) }

    /// Values submitted for `code`; an empty slice when none were.
    pub fn values(&self, code: &str) -> &[String] { self.get(code).unwrap_or(&[]) }

    pub fn insert(&mut self, code: impl Into<String>, values: Vec<String>) { self.0.insert(code.into(), values); }

    pub fn push(&mut self, code: impl Into<String>, value: impl Into<String>) {
        self.0.entry(code.into()).or_default().push(value.into());
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Attribute code of a form key: `attribute[CODE]` or `attribute[CODE][]`.
    pub fn form_key_code(key: &str) -> Option<&str> {
        let rest = key.strip_prefix(ATTRIBUTE_PREFIX)?;
        let code = rest.strip_suffix("][]").or_else(|| rest.strip_suffix(']'))?;
        (!code.is_empty() && !code.contains(['[', ']'])).then_some(code)
    }

    /// Collect attribute answers out of url-encoded form pairs, skipping
    /// every pair that is not an attribute and every blank answer.
    pub fn from_form_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut submitted = Self::new();
        for (key, value) in pairs {
            let value: String = value.into();
            match Self::form_key_code(key.as_ref()) {
                Some(code) if !value.trim().is_empty() => submitted.push(code, value),
                _ => {}
            }
        }
        submitted
    }

    /// Build from a JSON object whose values are a string or an array of strings.
    pub fn from_json(value: &Value) -> Result<Self, ModelError> {
        let obj = value
            .as_object()
            .ok_or_else(|| ModelError::format("attributes", "expected an object of attribute answers"))?;
        let mut submitted = Self::new();
        for (code, answer) in obj {
            let values = match answer {
                Value::String(s) => vec![s.clone()],
                Value::Array(items) => items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .map(str::to_string)
                            .ok_or_else(|| ModelError::format(format!("attributes.{code}"), "expected string values"))
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                Value::Null => Vec::new(),
                _ => return Err(ModelError::format(format!("attributes.{code}"), "expected a string or an array of strings")),
            };
            submitted.insert(code.clone(), values);
        }
        Ok(submitted)
    }
}

impl FromIterator<(String, Vec<String>)> for SubmittedAttributes {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self { Self(iter.into_iter().collect()) }
}

/// Arguments of a new service request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostServiceRequestInput {
    pub jurisdiction_id: Option<String>,
    pub service_code: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub address_string: Option<String>,
    pub address_id: Option<String>,
    pub email: Option<String>,
    pub device_id: Option<String>,
    pub account_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub media_url: Option<Url>,
    pub attributes: SubmittedAttributes,
}

impl PostServiceRequestInput {
    pub fn new(service_code: impl Into<String>) -> Self {
        Self { service_code: service_code.into(), ..Self::default() }
    }

    /// A location is a lat/long pair, a free-form address or an address id.
    pub fn has_location(&self) -> bool {
        (self.lat.is_some() && self.long.is_some())
            || self.address_string.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.address_id.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// Parse url-encoded form pairs as posted by Open311 clients.
    /// Unknown keys are ignored; blank values count as absent.
    pub fn from_form_pairs<K, V, I>(pairs: I) -> Result<Self, ModelError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut input = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            if let Some(code) = SubmittedAttributes::form_key_code(key) {
                if !value.trim().is_empty() {
                    input.attributes.push(code, value);
                }
                continue;
            }
            let text = (!value.trim().is_empty()).then(|| value.to_string());
            match key {
                "jurisdiction_id" => input.jurisdiction_id = text,
                "service_code" => input.service_code = value.to_string(),
                "lat" => input.lat = parse_coordinate(key, value)?,
                "long" => input.long = parse_coordinate(key, value)?,
                "address_string" => input.address_string = text,
                "address_id" => input.address_id = text,
                "email" => input.email = text,
                "device_id" => input.device_id = text,
                "account_id" => input.account_id = text,
                "first_name" => input.first_name = text,
                "last_name" => input.last_name = text,
                "phone" => input.phone = text,
                "description" => input.description = text,
                "media_url" => {
                    input.media_url = text
                        .map(|raw| Url::parse(&raw).map_err(|e| ModelError::format(key, format!("invalid absolute URI `{raw}`: {e}"))))
                        .transpose()?
                }
                _ => {}
            }
        }
        Ok(input)
    }
}

fn parse_coordinate(field: &str, raw: &str) -> Result<Option<f64>, ModelError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| ModelError::format(field, format!("`{raw}` is not a coordinate")))
}
