//! Request extractors that reject with the JSON error envelope.

mod json_body;
mod validated_query;

pub use json_body::JsonBody;
pub use validated_query::{empty_as_none, ValidatedQuery};
