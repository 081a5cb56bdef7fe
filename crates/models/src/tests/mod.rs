/// Encode/decode round trips across every entity and envelope
pub mod round_trip_tests;
