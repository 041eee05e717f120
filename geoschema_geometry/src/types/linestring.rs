use super::{Coordinates, GeometryTrait, MultiLineStringGeometry, SingleGeometryTrait, parse_json_list, verify_list};
use crate::wkt::write_position_list;
use anyhow::{Result, ensure};
use serde_json::Value;
use std::fmt::Debug;

/// Represents a sequence of connected positions forming a line.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LineStringGeometry(Vec<Coordinates>);

impl GeometryTrait for LineStringGeometry {
	fn from_coord_json(json: &Value) -> Result<Self> {
		parse_json_list(json, "position", Coordinates::from_json).map(Self)
	}

	fn to_coord_json(&self) -> Value {
		Value::Array(self.0.iter().map(Coordinates::to_json).collect())
	}

	/// Ensures that the line string has at least two positions.
	fn verify(&self) -> Result<()> {
		ensure!(
			self.0.len() >= 2,
			"a line string must have at least 2 positions, found {}",
			self.0.len()
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

impl SingleGeometryTrait<MultiLineStringGeometry> for LineStringGeometry {
	fn into_multi(self) -> MultiLineStringGeometry {
		MultiLineStringGeometry::from(vec![self])
	}
}

impl Debug for LineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_composite!(LineStringGeometry, Coordinates);

impl From<geo::LineString<f64>> for LineStringGeometry {
	fn from(geometry: geo::LineString<f64>) -> Self {
		Self(geometry.0.into_iter().map(Coordinates::from).collect())
	}
}

impl From<&LineStringGeometry> for geo::LineString<f64> {
	fn from(geometry: &LineStringGeometry) -> Self {
		geo::LineString(geometry.0.iter().map(geo::Coord::from).collect())
	}
}
