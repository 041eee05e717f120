use super::json_type;
use crate::{Geometry, GeometryError, GeometryKind, Shape, types::*};
use anyhow::{Context, Result, anyhow, ensure};
use log::trace;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Longest excerpt of the offending input quoted in a [`GeometryError::NotAnObject`].
const PREVIEW_LENGTH: usize = 40;

impl Geometry {
	/// Decodes a GeoJSON geometry object.
	///
	/// Fails with [`GeometryError::NotAnObject`] if `json` is not an object, with
	/// [`GeometryError::UnknownKind`] if its `type` is missing or not one of the seven
	/// geometry kinds, and with [`GeometryError::InvalidGeometry`] on any defect in the
	/// `coordinates` or `geometries` member. A `bbox` member is checked but not kept,
	/// other members are ignored.
	pub fn from_geojson(json: &Value) -> Result<Self, GeometryError> {
		let Some(object) = json.as_object() else {
			return Err(GeometryError::NotAnObject {
				found: preview(json),
				json_type: json_type(json),
			});
		};

		let kind = match object.get("type") {
			Some(Value::String(name)) => name.parse::<GeometryKind>()?,
			_ => return Err(GeometryError::UnknownKind { found: None }),
		};

		trace!("decoding {kind} geometry");
		decode_object(kind, object).map_err(|e| GeometryError::invalid(kind, &e))
	}

	/// Parses JSON text and decodes it with [`Geometry::from_geojson`].
	pub fn parse_geojson(text: &str) -> Result<Self, GeometryError> {
		let json: Value = serde_json::from_str(text)?;
		Self::from_geojson(&json)
	}
}

fn decode_object(kind: GeometryKind, object: &Map<String, Value>) -> Result<Geometry> {
	if let Some(bbox) = object.get("bbox") {
		check_bbox(bbox).context("bbox")?;
	}

	let member = kind.member_name();
	let json = object
		.get(member)
		.ok_or_else(|| anyhow!("missing member '{member}'"))?;

	let shape = decode_member(kind, json).context(member)?;
	shape.verify().context(member)?;
	Ok(Geometry::from_verified(shape))
}

fn decode_member(kind: GeometryKind, json: &Value) -> Result<Shape> {
	Ok(match kind {
		GeometryKind::GeometryCollection => Shape::GeometryCollection(GeometryCollection::from_coord_json(json)?),
		GeometryKind::LineString => Shape::LineString(LineStringGeometry::from_coord_json(json)?),
		GeometryKind::MultiLineString => Shape::MultiLineString(MultiLineStringGeometry::from_coord_json(json)?),
		GeometryKind::MultiPoint => Shape::MultiPoint(MultiPointGeometry::from_coord_json(json)?),
		GeometryKind::MultiPolygon => Shape::MultiPolygon(MultiPolygonGeometry::from_coord_json(json)?),
		GeometryKind::Point => Shape::Point(PointGeometry::from_coord_json(json)?),
		GeometryKind::Polygon => Shape::Polygon(PolygonGeometry::from_coord_json(json)?),
	})
}

/// A bounding box holds `2 * n` numbers with `n >= 2`.
fn check_bbox(json: &Value) -> Result<()> {
	let values = json
		.as_array()
		.ok_or_else(|| anyhow!("expected an array of numbers, found {}", json_type(json)))?;
	for (index, value) in values.iter().enumerate() {
		ensure!(
			value.is_number(),
			"value {index}: expected a number, found {}",
			json_type(value)
		);
	}
	ensure!(
		values.len() >= 4 && values.len() % 2 == 0,
		"a bounding box must have an even number of at least 4 values, found {}",
		values.len()
	);
	Ok(())
}

fn preview(json: &Value) -> String {
	let text = json.to_string();
	if text.chars().count() <= PREVIEW_LENGTH {
		return text;
	}
	let mut short = text.chars().take(PREVIEW_LENGTH - 3).collect::<String>();
	short.push_str("...");
	short
}

impl<'de> Deserialize<'de> for Geometry {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let json = Value::deserialize(deserializer)?;
		Geometry::from_geojson(&json).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!({"type": "Point", "coordinates": [1, 2]}), GeometryKind::Point)]
	#[case(json!({"type": "LineString", "coordinates": [[0, 0], [1, 1]]}), GeometryKind::LineString)]
	#[case(json!({"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}), GeometryKind::Polygon)]
	#[case(json!({"type": "MultiPoint", "coordinates": [[1, 2]]}), GeometryKind::MultiPoint)]
	#[case(json!({"type": "MultiLineString", "coordinates": [[[0, 0], [1, 1]]]}), GeometryKind::MultiLineString)]
	#[case(
		json!({"type": "MultiPolygon", "coordinates": [[[[0, 0], [1, 0], [1, 1], [0, 0]]]]}),
		GeometryKind::MultiPolygon
	)]
	#[case(json!({"type": "GeometryCollection", "geometries": []}), GeometryKind::GeometryCollection)]
	fn decodes_every_kind(#[case] json: Value, #[case] kind: GeometryKind) {
		let geometry = Geometry::from_geojson(&json).unwrap();
		assert_eq!(geometry.kind(), kind);
		assert_eq!(geometry.type_name(), json["type"]);
	}

	#[test]
	fn rejects_non_objects() {
		let err = Geometry::from_geojson(&json!("not a map")).unwrap_err();
		assert_eq!(
			err,
			GeometryError::NotAnObject {
				found: "\"not a map\"".to_string(),
				json_type: "a string"
			}
		);
		assert_eq!(err.to_string(), "value must be an object; but \"not a map\" has type a string");
		assert_eq!(err.error_kind(), crate::ErrorKind::TypeError);
	}

	#[test]
	fn long_inputs_are_shortened_in_errors() {
		let err = Geometry::from_geojson(&json!(vec![1; 100])).unwrap_err();
		let GeometryError::NotAnObject { found, .. } = err else {
			panic!("unexpected error {err:?}");
		};
		assert_eq!(found.chars().count(), PREVIEW_LENGTH);
		assert!(found.ends_with("..."));
	}

	#[rstest]
	#[case(json!({"type": "Triangle", "coordinates": [[0, 0], [1, 1]]}), Some("Triangle"))]
	#[case(json!({"type": "point", "coordinates": [1, 2]}), Some("point"))]
	#[case(json!({"type": "Feature", "geometry": null}), Some("Feature"))]
	#[case(json!({"coordinates": [1, 2]}), None)]
	#[case(json!({"type": 7, "coordinates": [1, 2]}), None)]
	fn rejects_unknown_kinds(#[case] json: Value, #[case] found: Option<&str>) {
		let err = Geometry::from_geojson(&json).unwrap_err();
		assert_eq!(
			err,
			GeometryError::UnknownKind {
				found: found.map(String::from)
			}
		);
		assert_eq!(err.error_kind(), crate::ErrorKind::ValueError);
	}

	#[test]
	fn unknown_kind_message_lists_allowed_kinds() {
		let err = Geometry::from_geojson(&json!({"type": "Triangle"})).unwrap_err();
		assert_eq!(
			err.to_string(),
			"unknown geometry type 'Triangle' (allowed: GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon)"
		);
	}

	#[rstest]
	#[case(json!({"type": "Point"}), "invalid Point: missing member 'coordinates'")]
	#[case(json!({"type": "GeometryCollection"}), "invalid GeometryCollection: missing member 'geometries'")]
	#[case(
		json!({"type": "Point", "coordinates": "1 2"}),
		"invalid Point: coordinates: expected a position array, found a string"
	)]
	#[case(
		json!({"type": "Point", "coordinates": [1, 2, 3, 4]}),
		"invalid Point: coordinates: a position must have two or three values, found 4"
	)]
	#[case(
		json!({"type": "LineString", "coordinates": [[0, 0], [1, "1"]]}),
		"invalid LineString: coordinates: position 1: expected a number, found a string"
	)]
	#[case(
		json!({"type": "LineString", "coordinates": [[0, 0]]}),
		"invalid LineString: coordinates: a line string must have at least 2 positions, found 1"
	)]
	#[case(
		json!({"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1]]]}),
		"invalid Polygon: coordinates: ring 0: a linear ring must be closed (first and last position must be equal)"
	)]
	#[case(
		json!({"type": "MultiPoint", "coordinates": []}),
		"invalid MultiPoint: coordinates: a multi point must have at least one point"
	)]
	#[case(
		json!({"type": "Point", "coordinates": [1, 2], "bbox": [0, 0, 1]}),
		"invalid Point: bbox: a bounding box must have an even number of at least 4 values, found 3"
	)]
	#[case(
		json!({"type": "Point", "coordinates": [1, 2], "bbox": [0, 0, "1", 1]}),
		"invalid Point: bbox: value 2: expected a number, found a string"
	)]
	#[case(
		json!({"type": "LineString", "coordinates": [[0, 0], [1, 1, 1]]}),
		"invalid LineString: coordinates: positions must either all have a z value or none"
	)]
	#[case(
		json!({"type": "Polygon", "coordinates": [
			[[0, 0, 5], [4, 0, 5], [4, 4, 5], [0, 0, 5]],
			[[1, 1], [2, 1], [2, 2], [1, 1]]
		]}),
		"invalid Polygon: coordinates: positions must either all have a z value or none"
	)]
	fn rejects_structural_defects(#[case] json: Value, #[case] message: &str) {
		let err = Geometry::from_geojson(&json).unwrap_err();
		assert_eq!(err.to_string(), message);
		assert_eq!(err.error_kind(), crate::ErrorKind::ValueError);
	}

	#[test]
	fn collection_members_may_differ_in_dimension() {
		let geometry = Geometry::from_geojson(&json!({"type": "GeometryCollection", "geometries": [
			{"type": "Point", "coordinates": [1, 2]},
			{"type": "Point", "coordinates": [1, 2, 3]}
		]}))
		.unwrap();
		assert_eq!(geometry.to_string(), "GEOMETRYCOLLECTION (POINT (1 2), POINT Z (1 2 3))");
	}

	#[test]
	fn bbox_and_extra_members_are_accepted() {
		let plain = Geometry::from_geojson(&json!({"type": "Point", "coordinates": [1, 2]})).unwrap();
		let decorated = Geometry::from_geojson(&json!({
			"type": "Point",
			"coordinates": [1, 2],
			"bbox": [1, 2, 1, 2],
			"crs": "ignored"
		}))
		.unwrap();
		assert_eq!(plain, decorated);
	}

	#[test]
	fn parse_geojson_reports_syntax_errors() {
		let geometry = Geometry::parse_geojson(r#"{"coordinates": [1, 2], "type": "Point"}"#).unwrap();
		assert_eq!(geometry.kind(), GeometryKind::Point);

		let err = Geometry::parse_geojson("{\"type\": ").unwrap_err();
		assert!(matches!(err, GeometryError::Json(_)));
	}

	#[test]
	fn deserialize_uses_the_decoder() {
		let geometry: Geometry = serde_json::from_value(json!({"type": "Point", "coordinates": [1, 2]})).unwrap();
		assert_eq!(geometry, Geometry::new_point([1.0, 2.0]).unwrap());

		let err = serde_json::from_value::<Geometry>(json!({"type": "Blob"})).unwrap_err();
		assert!(err.to_string().starts_with("unknown geometry type 'Blob'"));
	}
}
