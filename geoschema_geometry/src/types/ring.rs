use super::{Coordinates, GeometryTrait, parse_json_list, verify_list};
use crate::wkt::write_position_list;
use anyhow::{Result, ensure};
use serde_json::Value;
use std::fmt::Debug;

/// Represents a closed ring, the boundary element of a polygon.
/// The first and last positions must be identical.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RingGeometry(Vec<Coordinates>);

impl GeometryTrait for RingGeometry {
	fn from_coord_json(json: &Value) -> Result<Self> {
		parse_json_list(json, "position", Coordinates::from_json).map(Self)
	}

	fn to_coord_json(&self) -> Value {
		Value::Array(self.0.iter().map(Coordinates::to_json).collect())
	}

	/// Verifies that the ring is valid by checking:
	/// - It has at least 4 positions (3 unique points plus the closing point).
	/// - It is closed, i.e., the first and last positions are identical.
	fn verify(&self) -> Result<()> {
		ensure!(
			self.0.len() >= 4,
			"a linear ring must have at least 4 positions, found {}",
			self.0.len()
		);
		ensure!(
			self.0.first() == self.0.last(),
			"a linear ring must be closed (first and last position must be equal)"
		);
		verify_list(&self.0, "position", Coordinates::verify)
	}

	fn write_wkt(&self, out: &mut String) {
		write_position_list(out, &self.0);
	}

	fn has_z(&self) -> bool {
		self.0.iter().any(Coordinates::has_z)
	}

	fn all_z(&self) -> bool {
		self.0.iter().all(Coordinates::has_z)
	}
}

impl Debug for RingGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_composite!(RingGeometry, Coordinates);

impl From<geo::LineString<f64>> for RingGeometry {
	fn from(geometry: geo::LineString<f64>) -> Self {
		Self(geometry.0.into_iter().map(Coordinates::from).collect())
	}
}

impl From<&RingGeometry> for geo::LineString<f64> {
	fn from(geometry: &RingGeometry) -> Self {
		geo::LineString(geometry.0.iter().map(geo::Coord::from).collect())
	}
}
