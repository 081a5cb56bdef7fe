use anyhow::Result;
use chrono::{FixedOffset, TimeZone};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use url::Url;

use crate::codec::{from_json_str, to_json_string};
use crate::temporal::Timestamp;
use crate::*;

fn stamp(offset_hours: i32, minute: u32) -> Timestamp {
    FixedOffset::east_opt(offset_hours * 3600)
        .unwrap()
        .with_ymd_and_hms(2021, 11, 3, 9, minute, 5)
        .unwrap()
}

/// decode(encode(x)) == x, through both compact and pretty text.
fn assert_round_trip<T: WireDocument + PartialEq + std::fmt::Debug>(value: &T) -> Result<()> {
    for pretty in [false, true] {
        let text = to_json_string(value, pretty)?;
        let back: T = from_json_str(&text)?;
        assert_eq!(&back, value, "round trip through {text}");
    }
    assert_eq!(&T::decode(&value.encode())?, value);
    Ok(())
}

#[test]
fn error_and_errors() -> Result<()> {
    assert_round_trip(&Error::new(400, "service_code was not provided"))?;
    assert_round_trip(&Error { code: 0, description: None })?;
    assert_round_trip(&Errors::new())?;
    assert_round_trip(&Errors::from(vec![Error::new(400, "a"), Error::new(404, "b")]))?;
    Ok(())
}

#[test]
fn services() -> Result<()> {
    let full = Service {
        service_code: Some("SW-1".into()),
        service_name: Some("Sidewalk".into()),
        description: Some("Broken \"sidewalk\" slabs".into()),
        metadata: true,
        service_type: ServiceType::Batch,
        keywords: vec!["curb".into(), "slab".into(), "trip hazard".into()],
        group: Some("streets".into()),
    };
    assert_round_trip(&full)?;
    assert_round_trip(&Service::default())?;
    assert_round_trip(&Services::from(vec![full, Service::new("X")]))?;
    Ok(())
}

#[test]
fn definitions() -> Result<()> {
    let attrs: Vec<ServiceAttribute> = [
        AttributeDatatype::String,
        AttributeDatatype::Number,
        AttributeDatatype::Datetime,
        AttributeDatatype::Text,
        AttributeDatatype::Textarea,
    ]
    .into_iter()
    .enumerate()
    .map(|(i, datatype)| ServiceAttribute {
        required: i % 2 == 0,
        order: i as i32,
        datatype_description: Some(format!("{datatype} answer")),
        ..ServiceAttribute::new(format!("A{i}"), datatype)
    })
    .chain([ServiceAttribute {
        values: vec![ServiceAttributeValue::new("r", "Red"), ServiceAttributeValue { key: "g".into(), name: None }],
        description: Some("Colours".into()),
        ..ServiceAttribute::new("COLORS", AttributeDatatype::Multivaluelist)
    }])
    .collect();
    let def = ServiceDefinition::new("PAINT", attrs);
    assert_round_trip(&def)?;
    assert_round_trip(&ServiceDefinition::default())?;
    assert_round_trip(&def.attributes)?;
    Ok(())
}

#[test]
fn requests_with_every_optional_combination_of_timestamps() -> Result<()> {
    for (updated, expected) in [(None, None), (Some(stamp(2, 10)), None), (None, Some(stamp(-7, 20))), (Some(stamp(0, 1)), Some(stamp(5, 2)))] {
        let mut req = ServiceRequest::requested_at(stamp(-4, 0));
        req.updated_datetime = updated;
        req.expected_datetime = expected;
        assert_round_trip(&req)?;
    }
    Ok(())
}

#[test]
fn requests_with_independent_coordinates() -> Result<()> {
    for (lat, long) in [(None, None), (Some(45.508888), None), (None, Some(-73.561668)), (Some(-0.000001), Some(179.9999))] {
        let mut req = ServiceRequest::requested_at(stamp(1, 0));
        req.lat = lat;
        req.long = long;
        req.media_url = Some(Url::parse("https://media.example.org/a/b.png?size=large")?);
        assert_round_trip(&req)?;
    }
    Ok(())
}

#[test]
fn coordinates_survive_text_at_full_precision() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0x0311);
    let mut req = ServiceRequest::requested_at(stamp(0, 0));
    req.lat = Some(10.938711676632721);
    req.long = Some(-122.4194);
    assert_round_trip(&req)?;

    for _ in 0..20_000 {
        req.lat = Some(rng.gen_range(-90.0..=90.0));
        req.long = Some(rng.gen_range(-180.0..=180.0));
        let back: ServiceRequest = from_json_str(&to_json_string(&req, false)?)?;
        assert_eq!((back.lat, back.long), (req.lat, req.long));
    }
    Ok(())
}

#[test]
fn request_envelopes() -> Result<()> {
    let created = ServiceRequestCreated {
        service_request_id: Some("1".into()),
        token: Some("tok".into()),
        service_notice: None,
        account_id: Some("acct".into()),
    };
    let token = ServiceRequestToken { service_request_id: None, token: Some("tok".into()) };
    assert_round_trip(&created)?;
    assert_round_trip(&token)?;
    assert_round_trip(&ServiceRequests::single(created))?;
    assert_round_trip(&ServiceRequests::from(vec![token.clone(), token]))?;
    assert_round_trip(&ServiceRequests::from(vec![ServiceRequest::requested_at(stamp(3, 3))]))?;
    Ok(())
}
