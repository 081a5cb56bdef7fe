use serde_json::Value;

use super::fields::elements;
use super::{decode_items, encode_items, WireDocument};
use crate::errors::ModelError;

/// Plural envelope for request-shaped responses (`ServiceRequest`,
/// `ServiceRequestCreated`, `ServiceRequestToken`). Renders as a bare array,
/// or `<service_requests><request>…</request></service_requests>` in XML.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequests<T>(Vec<T>);

impl<T> ServiceRequests<T> {
    pub fn new() -> Self { Self(Vec::new()) }

    pub fn single(item: T) -> Self { Self(vec![item]) }

    pub fn into_inner(self) -> Vec<T> { self.0 }
}

impl<T> Default for ServiceRequests<T> {
    fn default() -> Self { Self::new() }
}

impl<T> std::ops::Deref for ServiceRequests<T> {
    type Target = Vec<T>;
    fn deref(&self) -> &Vec<T> { &self.0 }
}

impl<T> std::ops::DerefMut for ServiceRequests<T> {
    fn deref_mut(&mut self) -> &mut Vec<T> { &mut self.0 }
}

impl<T> From<Vec<T>> for ServiceRequests<T> {
    fn from(items: Vec<T>) -> Self { Self(items) }
}

impl<T> FromIterator<T> for ServiceRequests<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self { Self(iter.into_iter().collect()) }
}

impl<T> IntoIterator for ServiceRequests<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<T: WireDocument> WireDocument for ServiceRequests<T> {
    const ELEMENT: &'static str = elements::SERVICE_REQUESTS;
    const ITEM: Option<&'static str> = Some(T::ELEMENT);

    fn encode(&self) -> Value { encode_items(&self.0) }

    fn decode(value: &Value) -> Result<Self, ModelError> {
        decode_items(value, elements::SERVICE_REQUESTS).map(Self)
    }
}

impl<T: WireDocument> serde::Serialize for ServiceRequests<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.encode(), serializer)
    }
}

impl<'de, T: WireDocument> serde::Deserialize<'de> for ServiceRequests<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
        Self::decode(&value).map_err(serde::de::Error::custom)
    }
}
