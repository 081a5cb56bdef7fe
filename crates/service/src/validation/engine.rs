//! Schema-driven validation of submitted attribute answers.

use models::{AttributeDatatype, Service, ServiceAttribute, ServiceDefinition, SubmittedAttributes};
use models::temporal::is_iso8601_date_or_datetime;
use tracing::debug;

use super::ValidationResult;

pub const ONLY_ONE_VALUE: &str = "only one value permitted";
pub const INVALID_VALUE: &str = "invalid value";
pub const INVALID_NUMBER: &str = "invalid number";
pub const INVALID_DATETIME: &str = "invalid datetime";

/// Check `submitted` against the variable attributes of `schema`.
///
/// Attributes are visited in ascending `order` (ties in declaration order)
/// and each yields at most one failure. Submitted codes the schema does not
/// declare are ignored. An empty result means the answers are acceptable.
pub fn validate(service: &Service, schema: &ServiceDefinition, submitted: &SubmittedAttributes) -> Vec<ValidationResult> {
    let failures: Vec<ValidationResult> = schema
        .variable_attributes()
        .filter_map(|attr| check_attribute(attr, submitted.values(&attr.code)))
        .collect();
    if !failures.is_empty() {
        debug!(service_code = service.code(), failures = failures.len(), "attribute_validation_failed");
    }
    failures
}

fn check_attribute(attr: &ServiceAttribute, values: &[String]) -> Option<ValidationResult> {
    // blank answers count as absent
    let values: Vec<&str> = values.iter().map(String::as_str).filter(|v| !v.trim().is_empty()).collect();
    if values.is_empty() {
        return attr
            .required
            .then(|| ValidationResult::new(&attr.code, format!("{} is required", attr.label())));
    }
    if values.len() > 1 && !attr.datatype.allows_multiple() {
        return Some(ValidationResult::new(&attr.code, ONLY_ONE_VALUE));
    }
    let reason = match attr.datatype {
        AttributeDatatype::Number => (!values.iter().all(|v| is_signed_decimal(v))).then_some(INVALID_NUMBER),
        AttributeDatatype::Datetime => (!values.iter().all(|v| is_iso8601_date_or_datetime(v))).then_some(INVALID_DATETIME),
        AttributeDatatype::Singlevaluelist | AttributeDatatype::Multivaluelist => {
            (!values.iter().all(|v| attr.accepts_key(v))).then_some(INVALID_VALUE)
        }
        AttributeDatatype::String | AttributeDatatype::Text | AttributeDatatype::Textarea => None,
    };
    reason.map(|message| ValidationResult::new(&attr.code, message))
}

/// `[+-]digits[.digits]`, where either side of the point may be empty but not both.
pub fn is_signed_decimal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    !(whole.is_empty() && fraction.is_empty()) && digits(whole) && digits(fraction)
}
