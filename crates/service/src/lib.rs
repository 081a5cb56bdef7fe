//! Service layer for Open311 request intake on top of `models`.
//! - Schema-driven attribute validation (`validation`).
//! - Catalog and persistence collaborators as async traits with in-memory implementations.
//! - The intake workflow wiring them together, independent of any transport.

pub mod errors;
pub mod validation;
pub mod catalog;
pub mod requests;
pub mod intake;

pub use errors::ServiceError;
pub use validation::{AttributeValidator, ValidationResult};
