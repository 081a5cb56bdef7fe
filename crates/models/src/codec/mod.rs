//! Entity codec.
//!
//! Each Open311 entity maps to a wire document through an explicit field
//! table ([`fields`]): encoding writes the fields in table order into an
//! insertion-ordered JSON object, decoding reads them back by name and ignores
//! anything it does not know. The same document drives the JSON text
//! rendering, the XML rendering ([`xml`]) and the `serde` impls of the entities.

pub mod fields;
pub mod xml;
mod collection;

pub use collection::ServiceRequests;

use serde_json::{Map, Number, Value};
use url::Url;

use crate::errors::ModelError;
use crate::naming::WireToken;
use crate::temporal::{self, Timestamp};

/// A value with an Open311 wire representation.
pub trait WireDocument: Sized {
    /// Element name used when the document is rendered as XML.
    const ELEMENT: &'static str;
    /// Child element name when the document is a plural envelope.
    const ITEM: Option<&'static str> = None;

    fn encode(&self) -> Value;
    fn decode(value: &Value) -> Result<Self, ModelError>;
}

pub fn encode<T: WireDocument>(doc: &T) -> Value { doc.encode() }

pub fn decode<T: WireDocument>(value: &Value) -> Result<T, ModelError> { T::decode(value) }

/// Render as JSON text. Pretty output uses two-space indentation.
pub fn to_json_string<T: WireDocument>(doc: &T, pretty: bool) -> Result<String, ModelError> {
    let value = doc.encode();
    let text = if pretty { serde_json::to_string_pretty(&value)? } else { serde_json::to_string(&value)? };
    Ok(text)
}

pub fn from_json_str<T: WireDocument>(text: &str) -> Result<T, ModelError> {
    let value: Value = serde_json::from_str(text)?;
    T::decode(&value)
}

/// Encode a sequence as a bare array, keeping input order.
pub(crate) fn encode_items<T: WireDocument>(items: &[T]) -> Value {
    Value::Array(items.iter().map(T::encode).collect())
}

/// Decode a bare array; errors name the offending index, eg `attributes[1].code`.
pub(crate) fn decode_items<T: WireDocument>(value: &Value, field: &str) -> Result<Vec<T>, ModelError> {
    let items = value
        .as_array()
        .ok_or_else(|| mismatch(field, "array", value))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let path = format!("{field}[{i}]");
            T::decode(item).map_err(|e| match e {
                ModelError::Format { field, reason } if field == T::ELEMENT => ModelError::Format { field: path, reason },
                other => other.within(&path),
            })
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn mismatch(field: &str, expected: &str, found: &Value) -> ModelError {
    ModelError::format(field, format!("expected {expected}, found {}", kind(found)))
}

/// Builds an entity's wire object in field-table order.
#[derive(Default)]
pub(crate) struct WireWriter {
    obj: Map<String, Value>,
}

impl WireWriter {
    pub fn new() -> Self { Self::default() }

    fn value(mut self, field: &str, value: Value) -> Self {
        self.obj.insert(field.to_string(), value);
        self
    }

    pub fn text(self, field: &str, value: Option<&str>) -> Self {
        self.value(field, value.map_or(Value::Null, |s| Value::String(s.to_string())))
    }

    pub fn boolean(self, field: &str, value: bool) -> Self { self.value(field, Value::Bool(value)) }

    pub fn integer(self, field: &str, value: i32) -> Self { self.value(field, Value::from(value)) }

    /// Non-finite numbers have no JSON form and render as `null`.
    pub fn float(self, field: &str, value: Option<f64>) -> Self {
        self.value(field, value.and_then(Number::from_f64).map_or(Value::Null, Value::Number))
    }

    pub fn token<E: WireToken>(self, field: &str, value: E) -> Self {
        self.value(field, Value::String(value.token().to_string()))
    }

    pub fn timestamp(self, field: &str, value: Option<&Timestamp>) -> Self {
        self.value(field, temporal::encode_optional(value))
    }

    pub fn url(self, field: &str, value: Option<&Url>) -> Self { self.text(field, value.map(Url::as_str)) }

    pub fn items<T: WireDocument>(self, field: &str, items: &[T]) -> Self { self.value(field, encode_items(items)) }

    pub fn finish(self) -> Value { Value::Object(self.obj) }
}

/// Reads an entity's fields out of a wire object.
///
/// Missing keys and `null` are treated alike; a present value of the wrong
/// JSON type is a format error for that field.
pub(crate) struct WireReader<'a> {
    obj: &'a Map<String, Value>,
}

impl<'a> WireReader<'a> {
    pub fn new(value: &'a Value, element: &str) -> Result<Self, ModelError> {
        value
            .as_object()
            .map(|obj| Self { obj })
            .ok_or_else(|| mismatch(element, "object", value))
    }

    fn get(&self, field: &str) -> Option<&'a Value> { self.obj.get(field).filter(|v| !v.is_null()) }

    pub fn text(&self, field: &str) -> Result<Option<String>, ModelError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(mismatch(field, "string", other)),
        }
    }

    pub fn boolean(&self, field: &str) -> Result<bool, ModelError> {
        match self.get(field) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(mismatch(field, "boolean", other)),
        }
    }

    pub fn integer(&self, field: &str) -> Result<i32, ModelError> {
        let Some(value) = self.get(field) else { return Ok(0) };
        let wide = value.as_i64().ok_or_else(|| mismatch(field, "integer", value))?;
        i32::try_from(wide).map_err(|_| ModelError::format(field, format!("{wide} is out of range")))
    }

    pub fn float(&self, field: &str) -> Result<Option<f64>, ModelError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(other) => Err(mismatch(field, "number", other)),
        }
    }

    /// Absent tokens decode to the enum's first variant.
    pub fn token<E: WireToken>(&self, field: &str) -> Result<E, ModelError> {
        match self.get(field) {
            None => Ok(E::default()),
            Some(Value::String(s)) => E::parse_token(field, s),
            Some(other) => Err(mismatch(field, "string", other)),
        }
    }

    pub fn timestamp(&self, field: &str) -> Result<Option<Timestamp>, ModelError> {
        self.text(field)?
            .map(|raw| temporal::parse_iso8601(field, &raw))
            .transpose()
    }

    pub fn url(&self, field: &str) -> Result<Option<Url>, ModelError> {
        self.text(field)?
            .map(|raw| Url::parse(&raw).map_err(|e| ModelError::format(field, format!("invalid absolute URI `{raw}`: {e}"))))
            .transpose()
    }

    pub fn items<T: WireDocument>(&self, field: &str) -> Result<Vec<T>, ModelError> {
        self.get(field).map_or(Ok(Vec::new()), |v| decode_items(v, field))
    }
}

/// `serde` impls that go through the wire document.
macro_rules! wire_serde {
    ($($ty:ty),* $(,)?) => {$(
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&$crate::codec::WireDocument::encode(self), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                <$ty as $crate::codec::WireDocument>::decode(&value).map_err(serde::de::Error::custom)
            }
        }
    )*};
}
pub(crate) use wire_serde;

/// A plural envelope over one entity type: a bare JSON array, or a named XML
/// container with one child element per item.
macro_rules! wire_collection {
    ($(#[$meta:meta])* $name:ident, $item:ty, $element:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name(Vec<$item>);

        impl $name {
            pub fn new() -> Self { Self(Vec::new()) }

            pub fn into_inner(self) -> Vec<$item> { self.0 }
        }

        impl std::ops::Deref for $name {
            type Target = Vec<$item>;
            fn deref(&self) -> &Vec<$item> { &self.0 }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Vec<$item> { &mut self.0 }
        }

        impl From<Vec<$item>> for $name {
            fn from(items: Vec<$item>) -> Self { Self(items) }
        }

        impl FromIterator<$item> for $name {
            fn from_iter<I: IntoIterator<Item = $item>>(iter: I) -> Self { Self(iter.into_iter().collect()) }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<$item>;
            fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;
            fn into_iter(self) -> Self::IntoIter { self.0.iter() }
        }

        impl $crate::codec::WireDocument for $name {
            const ELEMENT: &'static str = $element;
            const ITEM: Option<&'static str> = Some(<$item as $crate::codec::WireDocument>::ELEMENT);

            fn encode(&self) -> serde_json::Value { $crate::codec::encode_items(&self.0) }

            fn decode(value: &serde_json::Value) -> Result<Self, $crate::errors::ModelError> {
                $crate::codec::decode_items(value, $element).map(Self)
            }
        }

        $crate::codec::wire_serde!($name);
    };
}
pub(crate) use wire_collection;
