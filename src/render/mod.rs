//! Rendering module for converting parsed catalogs to output formats.

mod json;

pub use json::{catalog_to_json, from_json, to_json, JsonFormat};
