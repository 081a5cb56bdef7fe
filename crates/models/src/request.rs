use serde_json::Value;
use url::Url;

use crate::codec::fields::{self, elements};
use crate::codec::{wire_serde, WireDocument, WireReader, WireWriter};
use crate::errors::ModelError;
use crate::naming::ServiceRequestStatus;
use crate::temporal::{self, Timestamp};

/// A citizen report against a service.
///
/// Timestamps are stored as instants and only become ISO-8601 strings on the
/// wire. All three timestamp keys are always written, as `null` when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    /// Assigned by the backing store once the request is accepted.
    pub service_request_id: Option<String>,
    pub status: ServiceRequestStatus,
    pub status_notes: Option<String>,
    pub service_name: Option<String>,
    pub service_code: Option<String>,
    /// Free text, up to 4000 characters.
    pub description: Option<String>,
    pub agency_responsible: Option<String>,
    pub service_notice: Option<String>,
    pub requested_datetime: Timestamp,
    /// For closed requests, the time the request was closed.
    pub updated_datetime: Option<Timestamp>,
    pub expected_datetime: Option<Timestamp>,
    pub address: Option<String>,
    pub address_id: Option<String>,
    pub zipcode: Option<String>,
    /// WGS84 latitude.
    pub lat: Option<f64>,
    /// WGS84 longitude.
    pub long: Option<f64>,
    pub media_url: Option<Url>,
}

impl ServiceRequest {
    /// A new open request, requested now.
    pub fn new() -> Self { Self::requested_at(temporal::now()) }

    pub fn requested_at(requested_datetime: Timestamp) -> Self {
        Self {
            service_request_id: None,
            status: ServiceRequestStatus::Open,
            status_notes: None,
            service_name: None,
            service_code: None,
            description: None,
            agency_responsible: None,
            service_notice: None,
            requested_datetime,
            updated_datetime: None,
            expected_datetime: None,
            address: None,
            address_id: None,
            zipcode: None,
            lat: None,
            long: None,
            media_url: None,
        }
    }

    /// Change status, stamping `updated_datetime`.
    pub fn set_status(&mut self, status: ServiceRequestStatus, notes: Option<String>, at: Timestamp) {
        self.status = status;
        self.status_notes = notes;
        self.updated_datetime = Some(at);
    }
}

impl Default for ServiceRequest {
    fn default() -> Self { Self::new() }
}

impl WireDocument for ServiceRequest {
    const ELEMENT: &'static str = elements::REQUEST;

    fn encode(&self) -> Value {
        WireWriter::new()
            .text(fields::SERVICE_REQUEST_ID, self.service_request_id.as_deref())
            .token(fields::STATUS, self.status)
            .text(fields::STATUS_NOTES, self.status_notes.as_deref())
            .text(fields::SERVICE_NAME, self.service_name.as_deref())
            .text(fields::SERVICE_CODE, self.service_code.as_deref())
            .text(fields::DESCRIPTION, self.description.as_deref())
            .text(fields::AGENCY_RESPONSIBLE, self.agency_responsible.as_deref())
            .text(fields::SERVICE_NOTICE, self.service_notice.as_deref())
            .timestamp(fields::REQUESTED_DATETIME, Some(&self.requested_datetime))
            .timestamp(fields::UPDATED_DATETIME, self.updated_datetime.as_ref())
            .timestamp(fields::EXPECTED_DATETIME, self.expected_datetime.as_ref())
            .text(fields::ADDRESS, self.address.as_deref())
            .text(fields::ADDRESS_ID, self.address_id.as_deref())
            .text(fields::ZIPCODE, self.zipcode.as_deref())
            .float(fields::LAT, self.lat)
            .float(fields::LONG, self.long)
            .url(fields::MEDIA_URL, self.media_url.as_ref())
            .finish()
    }

    fn decode(value: &Value) -> Result<Self, ModelError> {
        let r = WireReader::new(value, Self::ELEMENT)?;
        let requested_datetime = r
            .timestamp(fields::REQUESTED_DATETIME)?
            .ok_or_else(|| ModelError::format(fields::REQUESTED_DATETIME, "missing required timestamp"))?;
        Ok(Self {
            service_request_id: r.text(fields::SERVICE_REQUEST_ID)?,
            status: r.token(fields::STATUS)?,
            status_notes: r.text(fields::STATUS_NOTES)?,
            service_name: r.text(fields::SERVICE_NAME)?,
            service_code: r.text(fields::SERVICE_CODE)?,
            description: r.text(fields::DESCRIPTION)?,
            agency_responsible: r.text(fields::AGENCY_RESPONSIBLE)?,
            service_notice: r.text(fields::SERVICE_NOTICE)?,
            requested_datetime,
            updated_datetime: r.timestamp(fields::UPDATED_DATETIME)?,
            expected_datetime: r.timestamp(fields::EXPECTED_DATETIME)?,
            address: r.text(fields::ADDRESS)?,
            address_id: r.text(fields::ADDRESS_ID)?,
            zipcode: r.text(fields::ZIPCODE)?,
            lat: r.float(fields::LAT)?,
            long: r.float(fields::LONG)?,
            media_url: r.url(fields::MEDIA_URL)?,
        })
    }
}

/// Acknowledgement returned when a request is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRequestCreated {
    pub service_request_id: Option<String>,
    pub token: Option<String>,
    pub service_notice: Option<String>,
    pub account_id: Option<String>,
}

impl WireDocument for ServiceRequestCreated {
    const ELEMENT: &'static str = elements::REQUEST;

    fn encode(&self) -> Value {
        WireWriter::new()
            .text(fields::SERVICE_REQUEST_ID, self.service_request_id.as_deref())
            .text(fields::TOKEN, self.token.as_deref())
            .text(fields::SERVICE_NOTICE, self.service_notice.as_deref())
            .text(fields::ACCOUNT_ID, self.account_id.as_deref())
            .finish()
    }

    fn decode(value: &Value) -> Result<Self, ModelError> {
        let r = WireReader::new(value, Self::ELEMENT)?;
        Ok(Self {
            service_request_id: r.text(fields::SERVICE_REQUEST_ID)?,
            token: r.text(fields::TOKEN)?,
            service_notice: r.text(fields::SERVICE_NOTICE)?,
            account_id: r.text(fields::ACCOUNT_ID)?,
        })
    }
}

/// Correlates an asynchronous token with the request id it resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRequestToken {
    pub service_request_id: Option<String>,
    pub token: Option<String>,
}

impl WireDocument for ServiceRequestToken {
    const ELEMENT: &'static str = elements::REQUEST;

    fn encode(&self) -> Value {
        WireWriter::new()
            .text(fields::SERVICE_REQUEST_ID, self.service_request_id.as_deref())
            .text(fields::TOKEN, self.token.as_deref())
            .finish()
    }

    fn decode(value: &Value) -> Result<Self, ModelError> {
        let r = WireReader::new(value, Self::ELEMENT)?;
        Ok(Self { service_request_id: r.text(fields::SERVICE_REQUEST_ID)?, token: r.text(fields::TOKEN)? })
    }
}

wire_serde!(ServiceRequest, ServiceRequestCreated, ServiceRequestToken);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{from_json_str, to_json_string, xml::to_xml_string, ServiceRequests};
    use chrono::{FixedOffset, TimeZone};

    fn at(h: u32) -> Timestamp {
        FixedOffset::west_opt(4 * 3600).unwrap().with_ymd_and_hms(2010, 4, 14, h, 37, 38).unwrap()
    }

    fn full_request() -> anyhow::Result<ServiceRequest> {
        Ok(ServiceRequest {
            service_request_id: Some("638344".into()),
            status: ServiceRequestStatus::Closed,
            status_notes: Some("Duplicate request.".into()),
            service_name: Some("Sidewalk and Curb Issues".into()),
            service_code: Some("006".into()),
            description: Some("Curb is broken".into()),
            agency_responsible: Some("Department of Transportation".into()),
            service_notice: Some("The City will inspect within 48 hours.".into()),
            requested_datetime: at(6),
            updated_datetime: Some(at(7)),
            expected_datetime: Some(at(8)),
            address: Some("8TH AVE and JUDAH ST".into()),
            address_id: Some("545483".into()),
            zipcode: Some("94122".into()),
            lat: Some(37.762221815),
            long: Some(-122.4651145),
            media_url: Some(Url::parse("http://city.gov.s3.amazonaws.com/requests/media/638344.jpg")?),
        })
    }

    #[test]
    fn request_fixture() -> anyhow::Result<()> {
        let mut req = full_request()?;
        req.lat = Some(37.0);
        req.long = Some(-122.0);
        req.media_url = Some(Url::parse("http://example.com/blah/")?);
        let expected = r#"{
  "service_request_id": "638344",
  "status": "closed",
  "status_notes": "Duplicate request.",
  "service_name": "Sidewalk and Curb Issues",
  "service_code": "006",
  "description": "Curb is broken",
  "agency_responsible": "Department of Transportation",
  "service_notice": "The City will inspect within 48 hours.",
  "requested_datetime": "2010-04-14T06:37:38.0000000-04:00",
  "updated_datetime": "2010-04-14T07:37:38.0000000-04:00",
  "expected_datetime": "2010-04-14T08:37:38.0000000-04:00",
  "address": "8TH AVE and JUDAH ST",
  "address_id": "545483",
  "zipcode": "94122",
  "lat": 37.0,
  "long": -122.0,
  "media_url": "http://example.com/blah/"
}"#;
        assert_eq!(to_json_string(&req, true)?, expected);
        Ok(())
    }

    #[test]
    fn unset_fields_stay_on_the_wire_as_null() {
        let req = ServiceRequest::requested_at(at(6));
        let value = req.encode();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, fields::REQUEST_FIELDS);
        assert_eq!(value["requested_datetime"], "2010-04-14T06:37:38.0000000-04:00");
        assert!(value["updated_datetime"].is_null());
        assert!(value["expected_datetime"].is_null());
        assert!(value["lat"].is_null());
        assert!(value["media_url"].is_null());
        assert_eq!(value["status"], "open");
    }

    #[test]
    fn round_trips_full_and_sparse() -> anyhow::Result<()> {
        let full = full_request()?;
        assert_eq!(from_json_str::<ServiceRequest>(&to_json_string(&full, false)?)?, full);

        let mut sparse = ServiceRequest::requested_at(at(9));
        sparse.lat = Some(45.5);
        assert_eq!(from_json_str::<ServiceRequest>(&to_json_string(&sparse, true)?)?, sparse);
        Ok(())
    }

    #[test]
    fn status_change_stamps_updated_datetime() {
        let mut req = ServiceRequest::requested_at(at(6));
        req.set_status(ServiceRequestStatus::Closed, Some("fixed".into()), at(10));
        assert_eq!(req.updated_datetime, Some(at(10)));
        assert_eq!(req.encode()["status"], "closed");
    }

    #[test]
    fn decode_failures_name_the_field() {
        let err = from_json_str::<ServiceRequest>(r#"{"status":"open"}"#).unwrap_err();
        assert_eq!(err.field(), Some("requested_datetime"));

        let err = from_json_str::<ServiceRequest>(
            r#"{"requested_datetime":"2010-04-14T06:37:38-04:00","updated_datetime":"last week"}"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("updated_datetime"));

        let err = from_json_str::<ServiceRequest>(
            r#"{"requested_datetime":"2010-04-14T06:37:38-04:00","status":"pending"}"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("status"));

        let err = from_json_str::<ServiceRequest>(
            r#"{"requested_datetime":"2010-04-14T06:37:38-04:00","lat":"37.7"}"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("lat"));

        let err = from_json_str::<ServiceRequest>(
            r#"{"requested_datetime":"2010-04-14T06:37:38-04:00","media_url":"/relative.jpg"}"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("media_url"));
    }

    #[test]
    fn created_fixture_in_envelope() -> anyhow::Result<()> {
        let created = ServiceRequestCreated {
            service_request_id: Some("293944".into()),
            token: None,
            service_notice: Some("The City will inspect and require the responsible party to correct within 24 hours and/or issue a Correction Notice or Notice of Violation of the Public Works Code".into()),
            account_id: None,
        };
        let expected = r#"[
  {
    "service_request_id": "293944",
    "token": null,
    "service_notice": "The City will inspect and require the responsible party to correct within 24 hours and/or issue a Correction Notice or Notice of Violation of the Public Works Code",
    "account_id": null
  }
]"#;
        let envelope = ServiceRequests::single(created);
        assert_eq!(to_json_string(&envelope, true)?, expected);
        assert_eq!(from_json_str::<ServiceRequests<ServiceRequestCreated>>(expected)?, envelope);
        Ok(())
    }

    #[test]
    fn token_fixture_in_envelope() -> anyhow::Result<()> {
        let token = ServiceRequestToken { service_request_id: Some("638344".into()), token: Some("12345".into()) };
        let expected = r#"[
  {
    "service_request_id": "638344",
    "token": "12345"
  }
]"#;
        assert_eq!(to_json_string(&ServiceRequests::single(token), true)?, expected);
        Ok(())
    }

    #[test]
    fn requests_envelope_sizes() -> anyhow::Result<()> {
        let none: ServiceRequests<ServiceRequest> = ServiceRequests::new();
        assert_eq!(to_json_string(&none, false)?, "[]");

        let many: ServiceRequests<ServiceRequest> = (6..9).map(|h| ServiceRequest::requested_at(at(h))).collect();
        let value = many.encode();
        assert_eq!(value.as_array().map(Vec::len), Some(3));
        assert_eq!(value[2]["requested_datetime"], "2010-04-14T08:37:38.0000000-04:00");
        Ok(())
    }

    #[test]
    fn requests_xml_uses_request_children() -> anyhow::Result<()> {
        let envelope = ServiceRequests::from(vec![full_request()?]);
        let xml = to_xml_string(&envelope)?;
        assert!(xml.contains("<service_requests>"));
        assert!(xml.contains("<request>"));
        assert!(xml.contains("<status>closed</status>"));
        assert!(xml.contains("<lat>37.762221815</lat>"));
        assert!(xml.contains("<requested_datetime>2010-04-14T06:37:38.0000000-04:00</requested_datetime>"));
        Ok(())
    }

    #[test]
    fn serde_goes_through_the_wire_document() -> anyhow::Result<()> {
        let token = ServiceRequestToken { service_request_id: None, token: Some("abc".into()) };
        let text = serde_json::to_string(&token)?;
        assert_eq!(text, r#"{"service_request_id":null,"token":"abc"}"#);
        let back: ServiceRequestToken = serde_json::from_str(&text)?;
        assert_eq!(back, token);
        Ok(())
    }
}
