//! Enum naming layer.
//!
//! Every enum on the wire renders as the snake_case form of its variant name.
//! None of the Open311 variant names carry an internal word boundary, so the
//! tokens come out as the plain lowercase name (`blackbox`, `singlevaluelist`).
//! Parsing is ASCII case-insensitive.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::errors::ModelError;

/// Conversion between an enum value and its wire token.
pub trait WireToken: Copy + Default + FromStr + Into<&'static str> {
    fn token(self) -> &'static str { self.into() }

    /// Parse a token for `field`, accepting any ASCII case variant.
    fn parse_token(field: &str, raw: &str) -> Result<Self, ModelError> {
        raw.parse::<Self>()
            .map_err(|_| ModelError::format(field, format!("unrecognized token `{raw}`")))
    }
}

macro_rules! wire_token {
    ($($ty:ty),* $(,)?) => {$(
        impl WireToken for $ty {}

        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.token())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse::<$ty>()
                    .map_err(|_| serde::de::Error::custom(format!("unrecognized token `{raw}`")))
            }
        }
    )*};
}

/// How a service processes incoming requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, Display, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ServiceType {
    #[default]
    Realtime,
    Batch,
    Blackbox,
}

/// Answer datatype of a service attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, Display, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttributeDatatype {
    #[default]
    String,
    Number,
    Datetime,
    Text,
    Singlevaluelist,
    Multivaluelist,
    Textarea,
}

impl AttributeDatatype {
    /// Answers must come from the attribute's declared value list.
    pub fn is_list(self) -> bool {
        matches!(self, Self::Singlevaluelist | Self::Multivaluelist)
    }

    /// More than one raw value may be submitted.
    pub fn allows_multiple(self) -> bool { self == Self::Multivaluelist }
}

/// Lifecycle status of a service request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumString, Display, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ServiceRequestStatus {
    #[default]
    Open,
    Closed,
}

wire_token!(ServiceType, AttributeDatatype, ServiceRequestStatus);
