//! Cross-cutting helpers shared by the georeport binaries.

pub mod utils;
