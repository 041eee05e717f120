use super::{Coordinates, GeometryTrait, MultiPointGeometry, SingleGeometryTrait};
use crate::wkt::write_position;
use anyhow::Result;
use serde_json::Value;
use std::fmt::Debug;

/// Represents a single geographic or geometric point.
///
/// This is the simplest geometric type and the building block of line strings and rings.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PointGeometry(Coordinates);

impl PointGeometry {
	#[must_use]
	pub fn new(c: Coordinates) -> Self {
		Self(c)
	}
	#[must_use]
	pub fn x(&self) -> f64 {
		self.0.x()
	}
	#[must_use]
	pub fn y(&self) -> f64 {
		self.0.y()
	}
	#[must_use]
	pub fn as_coord(&self) -> &Coordinates {
		&self.0
	}
}

impl GeometryTrait for PointGeometry {
	fn from_coord_json(json: &Value) -> Result<Self> {
		Coordinates::from_json(json).map(Self)
	}

	/// Returns the point as a JSON array `[x, y]` or `[x, y, z]`.
	fn to_coord_json(&self) -> Value {
		self.0.to_json()
	}

	fn verify(&self) -> Result<()> {
		self.0.verify()
	}

	fn write_wkt(&self, out: &mut String) {
		out.push('(');
		write_position(out, &self.0);
		out.push(')');
	}

	fn has_z(&self) -> bool {
		self.0.has_z()
	}

	fn all_z(&self) -> bool {
		self.0.has_z()
	}
}

impl SingleGeometryTrait<MultiPointGeometry> for PointGeometry {
	fn into_multi(self) -> MultiPointGeometry {
		MultiPointGeometry::from(vec![self])
	}
}

impl Debug for PointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

impl<T> From<T> for PointGeometry
where
	Coordinates: From<T>,
{
	fn from(value: T) -> Self {
		Self(Coordinates::from(value))
	}
}
