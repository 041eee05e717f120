use super::*;
use crate::wkt::write_wkt_list;
use anyhow::{Result, ensure};
use serde_json::Value;
use std::fmt::Debug;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MultiPointGeometry(Vec<PointGeometry>);

impl GeometryTrait for MultiPointGeometry {
	fn from_coord_json(json: &Value) -> Result<Self> {
		parse_json_list(json, "point", PointGeometry::from_coord_json).map(Self)
	}

	fn to_coord_json(&self) -> Value {
		Value::Array(self.0.iter().map(PointGeometry::to_coord_json).collect())
	}

	fn verify(&self) -> Result<()> {
		ensure!(!self.0.is_empty(), "a multi point must have at least one point");
		verify_list(&self.0, "point", PointGeometry::verify)
	}

	/// Every member is wrapped in its own parentheses: `((1 2), (3 4))`.
	fn write_wkt(&self, out: &mut String) {
		write_wkt_list(out, &self.0, PointGeometry::write_wkt);
	}

	fn has_z(&self) -> bool {
		self.0.iter().any(PointGeometry::has_z)
	}

	fn all_z(&self) -> bool {
		self.0.iter().all(PointGeometry::has_z)
	}
}

impl Debug for MultiPointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_composite!(MultiPointGeometry, PointGeometry);

impl From<geo::MultiPoint<f64>> for MultiPointGeometry {
	fn from(geometry: geo::MultiPoint<f64>) -> Self {
		Self(geometry.0.into_iter().map(|p| PointGeometry::from(p.0)).collect())
	}
}

impl From<&MultiPointGeometry> for geo::MultiPoint<f64> {
	fn from(geometry: &MultiPointGeometry) -> Self {
		geo::MultiPoint(
			geometry
				.0
				.iter()
				.map(|p| geo::Point(geo::Coord::from(p.as_coord())))
				.collect(),
		)
	}
}
