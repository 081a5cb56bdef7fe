//! Wire names for every Open311 field and element, and the per-entity field order.

pub const CODE: &str = "code";
pub const DESCRIPTION: &str = "description";

pub const SERVICE_CODE: &str = "service_code";
pub const SERVICE_NAME: &str = "service_name";
pub const METADATA: &str = "metadata";
pub const TYPE: &str = "type";
pub const KEYWORDS: &str = "keywords";
pub const GROUP: &str = "group";

pub const VARIABLE: &str = "variable";
pub const DATATYPE: &str = "datatype";
pub const REQUIRED: &str = "required";
pub const DATATYPE_DESCRIPTION: &str = "datatype_description";
pub const ORDER: &str = "order";
pub const VALUES: &str = "values";
pub const KEY: &str = "key";
pub const NAME: &str = "name";
pub const ATTRIBUTES: &str = "attributes";

pub const SERVICE_REQUEST_ID: &str = "service_request_id";
pub const STATUS: &str = "status";
pub const STATUS_NOTES: &str = "status_notes";
pub const AGENCY_RESPONSIBLE: &str = "agency_responsible";
pub const SERVICE_NOTICE: &str = "service_notice";
pub const REQUESTED_DATETIME: &str = "requested_datetime";
pub const UPDATED_DATETIME: &str = "updated_datetime";
pub const EXPECTED_DATETIME: &str = "expected_datetime";
pub const ADDRESS: &str = "address";
pub const ADDRESS_ID: &str = "address_id";
pub const ZIPCODE: &str = "zipcode";
pub const LAT: &str = "lat";
pub const LONG: &str = "long";
pub const MEDIA_URL: &str = "media_url";
pub const TOKEN: &str = "token";
pub const ACCOUNT_ID: &str = "account_id";

pub mod elements {
    pub const ERROR: &str = "error";
    pub const ERRORS: &str = "errors";
    pub const SERVICE: &str = "service";
    pub const SERVICES: &str = "services";
    pub const SERVICE_DEFINITION: &str = "service_definition";
    pub const ATTRIBUTE: &str = "attribute";
    pub const VALUE: &str = "value";
    pub const REQUEST: &str = "request";
    pub const SERVICE_REQUESTS: &str = "service_requests";
}

pub const ERROR_FIELDS: &[&str] = &[CODE, DESCRIPTION];

pub const SERVICE_FIELDS: &[&str] = &[SERVICE_CODE, SERVICE_NAME, DESCRIPTION, METADATA, TYPE, KEYWORDS, GROUP];

pub const ATTRIBUTE_VALUE_FIELDS: &[&str] = &[KEY, NAME];

pub const ATTRIBUTE_FIELDS: &[&str] =
    &[VARIABLE, CODE, DATATYPE, REQUIRED, DATATYPE_DESCRIPTION, ORDER, DESCRIPTION, VALUES];

pub const DEFINITION_FIELDS: &[&str] = &[SERVICE_CODE, ATTRIBUTES];

pub const REQUEST_FIELDS: &[&str] = &[
    SERVICE_REQUEST_ID,
    STATUS,
    STATUS_NOTES,
    SERVICE_NAME,
    SERVICE_CODE,
    DESCRIPTION,
    AGENCY_RESPONSIBLE,
    SERVICE_NOTICE,
    REQUESTED_DATETIME,
    UPDATED_DATETIME,
    EXPECTED_DATETIME,
    ADDRESS,
    ADDRESS_ID,
    ZIPCODE,
    LAT,
    LONG,
    MEDIA_URL,
];

pub const REQUEST_CREATED_FIELDS: &[&str] = &[SERVICE_REQUEST_ID, TOKEN, SERVICE_NOTICE, ACCOUNT_ID];

pub const REQUEST_TOKEN_FIELDS: &[&str] = &[SERVICE_REQUEST_ID, TOKEN];

/// Child element name for an array-valued field nested inside an entity.
pub fn singular(plural: &str) -> Option<&'static str> {
    match plural {
        ATTRIBUTES => Some(elements::ATTRIBUTE),
        VALUES => Some(elements::VALUE),
        elements::ERRORS => Some(elements::ERROR),
        elements::SERVICES => Some(elements::SERVICE),
        elements::SERVICE_REQUESTS => Some(elements::REQUEST),
        _ => None,
    }
}
