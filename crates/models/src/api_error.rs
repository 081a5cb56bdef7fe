use serde_json::Value;

use crate::codec::fields::{self, elements};
use crate::codec::{wire_collection, wire_serde, WireDocument, WireReader, WireWriter};
use crate::errors::ModelError;

/// A client-facing error entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub description: Option<String>,
}

impl Error {
    pub fn new(code: i32, description: impl Into<String>) -> Self {
        Self { code, description: Some(description.into()) }
    }
}

impl WireDocument for Error {
    const ELEMENT: &'static str = elements::ERROR;

    fn encode(&self) -> Value {
        WireWriter::new()
            .integer(fields::CODE, self.code)
            .text(fields::DESCRIPTION, self.description.as_deref())
            .finish()
    }

    fn decode(value: &Value) -> Result<Self, ModelError> {
        let r = WireReader::new(value, Self::ELEMENT)?;
        Ok(Self { code: r.integer(fields::CODE)?, description: r.text(fields::DESCRIPTION)? })
    }
}

wire_serde!(Error);

wire_collection!(
    /// Error response body.
    Errors,
    Error,
    elements::ERRORS
);

impl Errors {
    pub fn add(&mut self, code: i32, description: impl Into<String>) { self.push(Error::new(code, description)); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_json_str, to_json_string};

    #[test]
    fn error_fixture() -> anyhow::Result<()> {
        let e = Error::new(403, "api_key was not provided");
        let expected = r#"{
  "code": 403,
  "description": "api_key was not provided"
}"#;
        assert_eq!(to_json_string(&e, true)?, expected);
        Ok(())
    }

    #[test]
    fn errors_is_a_bare_array() -> anyhow::Result<()> {
        let errors = Errors::from(vec![Error::new(404, "service_code not found")]);
        let expected = r#"[
  {
    "code": 404,
    "description": "service_code not found"
  }
]"#;
        assert_eq!(to_json_string(&errors, true)?, expected);
        Ok(())
    }

    #[test]
    fn add_keeps_order_and_round_trips() -> anyhow::Result<()> {
        let mut errors = Errors::new();
        errors.add(400, "first");
        errors.add(400, "second");
        errors.add(500, "third");
        let back: Errors = from_json_str(&to_json_string(&errors, false)?)?;
        assert_eq!(back, errors);
        assert_eq!(back[1].description.as_deref(), Some("second"));
        Ok(())
    }

    #[test]
    fn code_must_be_an_integer() {
        let err = from_json_str::<Error>(r#"{"code":"400","description":"x"}"#).unwrap_err();
        assert_eq!(err.field(), Some("code"));
        let err = from_json_str::<Errors>(r#"[{"code":400},{"code":4.5}]"#).unwrap_err();
        assert_eq!(err.field(), Some("errors[1].code"));
    }
}
