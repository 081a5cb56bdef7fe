//! Request intake: catalog lookup, attribute validation, persistence.

pub mod service;

pub use service::{RequestIntake, LOCATION_REQUIRED};
