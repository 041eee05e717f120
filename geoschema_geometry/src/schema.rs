//! JSON Schema fragments describing GeoJSON geometry objects.
//!
//! The coordinate templates mirror the minimum cardinalities of RFC 7946: a position has
//! at least two numbers, a line string at least two positions, a linear ring at least
//! four, and a bounding box at least four numbers.

use crate::GeometryKind;
use lazy_static::lazy_static;
use serde_json::{Map, Value, json};

lazy_static! {
	static ref BBOX: Value = json!({
		"type": "array",
		"minItems": 4,
		"items": {"type": "number"}
	});
	static ref POINT_COORDINATES: Value = json!({
		"type": "array",
		"minItems": 2,
		"items": {"type": "number"}
	});
	static ref LINE_STRING_COORDINATES: Value = array_of(2, &POINT_COORDINATES);
	static ref LINEAR_RING_COORDINATES: Value = array_of(4, &POINT_COORDINATES);
	static ref POLYGON_COORDINATES: Value = array_of(1, &LINEAR_RING_COORDINATES);
	static ref MULTI_POINT_COORDINATES: Value = array_of(1, &POINT_COORDINATES);
	static ref MULTI_LINE_STRING_COORDINATES: Value = array_of(1, &LINE_STRING_COORDINATES);
	static ref MULTI_POLYGON_COORDINATES: Value = array_of(1, &POLYGON_COORDINATES);

	/// Fragments of the six simple kinds, indexed by declaration order.
	/// The `GeometryCollection` slot is `None`.
	static ref SIMPLE_FRAGMENTS: Vec<Option<Value>> = GeometryKind::ALL
		.into_iter()
		.map(|kind| coordinates_schema(kind).map(|coordinates| geometry_json_schema(kind, Some(coordinates), None)))
		.collect();

	/// Composed from [`SIMPLE_FRAGMENTS`].
	static ref COLLECTION_FRAGMENT: Value = {
		let members = COLLECTION_MEMBERS.into_iter().filter_map(simple_fragment);
		let geometries = json!({
			"type": "array",
			"items": one_of(members)
		});
		geometry_json_schema(GeometryKind::GeometryCollection, None, Some(&geometries))
	};
}

/// Kinds allowed inside a `GeometryCollection`, in the order they are offered.
const COLLECTION_MEMBERS: [GeometryKind; 6] = [
	GeometryKind::LineString,
	GeometryKind::Point,
	GeometryKind::Polygon,
	GeometryKind::MultiLineString,
	GeometryKind::MultiPoint,
	GeometryKind::MultiPolygon,
];

fn array_of(min_items: usize, items: &Value) -> Value {
	json!({
		"type": "array",
		"minItems": min_items,
		"items": items
	})
}

/// Builds the object schema of one geometry kind.
///
/// `coordinates` is given for the six simple kinds, `geometries` for
/// `GeometryCollection`. Each given member becomes a required property next to `type`.
/// `bbox` is always allowed but never required.
#[must_use]
pub fn geometry_json_schema(kind: GeometryKind, coordinates: Option<&Value>, geometries: Option<&Value>) -> Value {
	let mut properties = Map::new();
	properties.insert("type".to_string(), json!({"type": "string", "const": kind.as_str()}));
	properties.insert("bbox".to_string(), BBOX.clone());

	let mut required = vec![Value::from("type")];
	for (name, schema) in [("coordinates", coordinates), ("geometries", geometries)] {
		if let Some(schema) = schema {
			required.push(Value::from(name));
			properties.insert(name.to_string(), schema.clone());
		}
	}

	json!({
		"type": "object",
		"required": required,
		"properties": properties
	})
}

/// `{"oneOf": [...]}` over the given fragments, in the given order.
#[must_use]
pub fn one_of<'a>(schemas: impl IntoIterator<Item = &'a Value>) -> Value {
	json!({ "oneOf": schemas.into_iter().cloned().collect::<Vec<_>>() })
}

/// The precomputed fragment of one kind.
#[must_use]
pub fn kind_json_schema(kind: GeometryKind) -> &'static Value {
	match simple_fragment(kind) {
		Some(fragment) => fragment,
		None => &*COLLECTION_FRAGMENT,
	}
}

fn simple_fragment(kind: GeometryKind) -> Option<&'static Value> {
	SIMPLE_FRAGMENTS[kind as usize].as_ref()
}

fn coordinates_schema(kind: GeometryKind) -> Option<&'static Value> {
	let coordinates: &'static Value = match kind {
		GeometryKind::GeometryCollection => return None,
		GeometryKind::LineString => &*LINE_STRING_COORDINATES,
		GeometryKind::MultiLineString => &*MULTI_LINE_STRING_COORDINATES,
		GeometryKind::MultiPoint => &*MULTI_POINT_COORDINATES,
		GeometryKind::MultiPolygon => &*MULTI_POLYGON_COORDINATES,
		GeometryKind::Point => &*POINT_COORDINATES,
		GeometryKind::Polygon => &*POLYGON_COORDINATES,
	};
	Some(coordinates)
}
