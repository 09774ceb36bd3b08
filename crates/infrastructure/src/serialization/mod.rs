//! JSON serialization helpers.

mod json;

pub use json::{SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes};
