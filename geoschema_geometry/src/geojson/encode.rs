use crate::Geometry;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

impl Geometry {
	/// Encodes the geometry as a GeoJSON object: `type` plus `coordinates`, or `geometries`
	/// for a collection.
	#[must_use]
	pub fn to_geojson(&self) -> Value {
		let mut object = Map::new();
		object.insert("type".to_string(), Value::from(self.type_name()));
		object.insert(self.kind().member_name().to_string(), self.shape().to_coord_json());
		Value::Object(object)
	}

	/// Compact JSON text of [`Geometry::to_geojson`].
	#[must_use]
	pub fn to_geojson_string(&self) -> String {
		self.to_geojson().to_string()
	}
}

impl Serialize for Geometry {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.to_geojson().serialize(serializer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use serde_json::json;
	use std::{
		collections::hash_map::DefaultHasher,
		hash::{Hash, Hasher},
	};

	fn hash_of(geometry: &Geometry) -> u64 {
		let mut hasher = DefaultHasher::new();
		geometry.hash(&mut hasher);
		hasher.finish()
	}

	#[rstest]
	#[case(json!({"type": "Point", "coordinates": [1.5, -2]}))]
	#[case(json!({"type": "Point", "coordinates": [1, 2, 3.25]}))]
	#[case(json!({"type": "LineString", "coordinates": [[0, 0], [1, 1], [2, 0.5]]}))]
	#[case(json!({"type": "Polygon", "coordinates": [
		[[0, 0], [5, 0], [5, 5], [0, 5], [0, 0]],
		[[1, 1], [2, 1], [2, 2], [1, 1]]
	]}))]
	#[case(json!({"type": "MultiPoint", "coordinates": [[1, 2], [3, 4]]}))]
	#[case(json!({"type": "MultiLineString", "coordinates": [[[0, 0], [1, 1]], [[2, 2], [3, 3]]]}))]
	#[case(json!({"type": "MultiPolygon", "coordinates": [
		[[[0, 0], [1, 0], [1, 1], [0, 0]]],
		[[[5, 5], [6, 5], [6, 6], [5, 5]]]
	]}))]
	#[case(json!({"type": "GeometryCollection", "geometries": [
		{"type": "Point", "coordinates": [1, 2]},
		{"type": "MultiPoint", "coordinates": [[1, 2]]}
	]}))]
	#[case(json!({"type": "GeometryCollection", "geometries": []}))]
	fn round_trip(#[case] json: Value) {
		let geometry = Geometry::from_geojson(&json).unwrap();
		let encoded = geometry.to_geojson();
		assert_eq!(encoded, json);
		assert_eq!(Geometry::from_geojson(&encoded).unwrap(), geometry);
	}

	#[test]
	fn bbox_is_not_encoded() {
		let json = json!({"type": "Point", "coordinates": [1, 2], "bbox": [1, 2, 1, 2]});
		let geometry = Geometry::from_geojson(&json).unwrap();
		assert_eq!(geometry.to_geojson(), json!({"type": "Point", "coordinates": [1, 2]}));
	}

	#[test]
	fn geojson_string() {
		let geometry = Geometry::new_line_string(&[[0, 0], [1, 1]]).unwrap();
		assert_eq!(
			geometry.to_geojson_string(),
			r#"{"coordinates":[[0,0],[1,1]],"type":"LineString"}"#
		);
	}

	#[test]
	fn serialize_uses_the_encoder() {
		let geometry = Geometry::new_point([1.0, 2.0]).unwrap();
		assert_eq!(serde_json::to_value(&geometry).unwrap(), geometry.to_geojson());
	}

	#[test]
	fn key_order_does_not_matter() {
		let a = Geometry::parse_geojson(r#"{"type": "Point", "coordinates": [1, 2]}"#).unwrap();
		let b = Geometry::parse_geojson(r#"{"coordinates": [1.0, 2.0], "type": "Point"}"#).unwrap();
		assert_eq!(a, b);
		assert_eq!(hash_of(&a), hash_of(&b));
	}

	#[test]
	fn point_is_not_a_one_member_multi_point() {
		let point = Geometry::from_geojson(&json!({"type": "Point", "coordinates": [1, 2]})).unwrap();
		let multi = Geometry::from_geojson(&json!({"type": "MultiPoint", "coordinates": [[1, 2]]})).unwrap();
		assert_ne!(point, multi);
		assert_eq!(point.into_multi(), multi);
	}

	#[test]
	fn negative_zero_survives_and_hashes_like_zero() {
		let negative = Geometry::new_point([-0.0, 1.0]).unwrap();
		let positive = Geometry::new_point([0.0, 1.0]).unwrap();
		assert_eq!(negative, positive);
		assert_eq!(hash_of(&negative), hash_of(&positive));
		assert_eq!(negative.to_geojson_string(), r#"{"coordinates":[-0.0,1],"type":"Point"}"#);
	}
}
