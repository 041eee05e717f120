//! GeoJSON geometry objects (RFC 7946, section 3.1) to and from [`crate::Geometry`].

mod decode;
mod encode;

use serde_json::Value;

/// Describes the JSON type of a value for error messages, e.g. `"a string"`.
pub(crate) fn json_type(json: &Value) -> &'static str {
	match json {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
