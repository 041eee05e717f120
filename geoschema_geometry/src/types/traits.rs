use crate::geojson::json_type;
use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use std::{fmt::Debug, hash::Hash};

/// Defines the basic interface shared by every shape that can sit inside a
/// [`crate::Geometry`].
pub trait GeometryTrait: Debug + Clone + PartialEq + Eq + Hash + Sized {
	/// Parses the shape from its GeoJSON `coordinates` value.
	///
	/// Only the nesting and the number types are checked here, cardinality rules are
	/// left to [`GeometryTrait::verify`].
	fn from_coord_json(json: &Value) -> Result<Self>;

	/// Converts the shape into its GeoJSON `coordinates` value.
	fn to_coord_json(&self) -> Value;

	/// Verifies the structural validity of the shape, e.g. minimum point counts or
	/// closed rings. Returns an error describing the first defect.
	fn verify(&self) -> Result<()>;

	/// Writes the parenthesised well-known-text body, e.g. `(1 2, 3 4)`.
	fn write_wkt(&self, out: &mut String);

	/// Whether any position carries a `z` value.
	fn has_z(&self) -> bool;

	/// Whether every position carries a `z` value.
	fn all_z(&self) -> bool;
}

/// Represents geometries that can be wrapped into a corresponding multi-geometry.
/// For example, a single `PointGeometry` can be converted into a `MultiPointGeometry`.
pub trait SingleGeometryTrait<Multi>: Debug + Clone {
	/// Converts the single geometry into its multi-geometry equivalent.
	fn into_multi(self) -> Multi;
}

/// Represents composite geometries that are sequences of simpler elements.
/// For example, a polygon is made of rings, and a multilinestring is made of lines.
///
/// There are no mutating methods: a shape is built once and then only read.
pub trait CompositeGeometryTrait<Item>: Debug + Clone {
	/// Returns the contained elements.
	fn as_slice(&self) -> &[Item];

	/// Consumes the composite geometry and returns the inner collection of elements.
	fn into_inner(self) -> Vec<Item>;

	/// Checks whether the composite geometry contains no elements.
	fn is_empty(&self) -> bool {
		self.as_slice().is_empty()
	}

	/// Returns the number of elements contained in the composite geometry.
	fn len(&self) -> usize {
		self.as_slice().len()
	}

	fn iter(&self) -> std::slice::Iter<'_, Item> {
		self.as_slice().iter()
	}

	fn first(&self) -> Option<&Item> {
		self.as_slice().first()
	}

	fn last(&self) -> Option<&Item> {
		self.as_slice().last()
	}
}

/// Parses a JSON array element by element, naming the failing element in the error.
pub(crate) fn parse_json_list<T>(json: &Value, item_name: &str, parse: impl Fn(&Value) -> Result<T>) -> Result<Vec<T>> {
	let list = json
		.as_array()
		.ok_or_else(|| anyhow!("expected an array of {item_name}s, found {}", json_type(json)))?;
	list
		.iter()
		.enumerate()
		.map(|(index, value)| parse(value).with_context(|| format!("{item_name} {index}")))
		.collect()
}

/// Runs `verify` on every element, naming the failing element in the error.
pub(crate) fn verify_list<T>(items: &[T], item_name: &str, verify: impl Fn(&T) -> Result<()>) -> Result<()> {
	for (index, item) in items.iter().enumerate() {
		verify(item).with_context(|| format!("{item_name} {index}"))?;
	}
	Ok(())
}
