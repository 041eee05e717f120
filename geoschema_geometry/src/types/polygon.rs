use super::*;
use crate::wkt::write_wkt_list;
use anyhow::{Result, ensure};
use serde_json::Value;
use std::fmt::Debug;

/// A polygon: an exterior ring followed by zero or more interior rings (holes).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PolygonGeometry(Vec<RingGeometry>);

impl GeometryTrait for PolygonGeometry {
	fn from_coord_json(json: &Value) -> Result<Self> {
		parse_json_list(json, "ring", RingGeometry::from_coord_json).map(Self)
	}

	fn to_coord_json(&self) -> Value {
		Value::Array(self.0.iter().map(RingGeometry::to_coord_json).collect())
	}

	fn verify(&self) -> Result<()> {
		ensure!(!self.0.is_empty(), "a polygon must have at least one ring");
		verify_list(&self.0, "ring", RingGeometry::verify)
	}

	fn write_wkt(&self, out: &mut String) {
		write_wkt_list(out, &self.0, RingGeometry::write_wkt);
	}

	fn has_z(&self) -> bool {
		self.0.iter().any(RingGeometry::has_z)
	}

	fn all_z(&self) -> bool {
		self.0.iter().all(RingGeometry::all_z)
	}
}

impl PolygonGeometry {
	/// The outer boundary, if the polygon has any ring at all.
	pub fn exterior(&self) -> Option<&RingGeometry> {
		self.0.first()
	}

	pub fn interiors(&self) -> &[RingGeometry] {
		self.0.get(1..).unwrap_or_default()
	}
}

impl SingleGeometryTrait<MultiPolygonGeometry> for PolygonGeometry {
	fn into_multi(self) -> MultiPolygonGeometry {
		MultiPolygonGeometry::from(vec![self])
	}
}

impl Debug for PolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_composite!(PolygonGeometry, RingGeometry);

impl From<geo::Polygon<f64>> for PolygonGeometry {
	fn from(geometry: geo::Polygon<f64>) -> Self {
		let (exterior, interiors) = geometry.into_inner();
		let mut rings = Vec::with_capacity(interiors.len() + 1);
		rings.push(RingGeometry::from(exterior));
		for interior in interiors {
			rings.push(RingGeometry::from(interior));
		}
		PolygonGeometry(rings)
	}
}

impl From<&PolygonGeometry> for geo::Polygon<f64> {
	fn from(geometry: &PolygonGeometry) -> Self {
		let exterior = geometry
			.exterior()
			.map(geo::LineString::from)
			.unwrap_or_else(|| geo::LineString(Vec::new()));
		let interiors = geometry.interiors().iter().map(geo::LineString::from).collect();
		geo::Polygon::new(exterior, interiors)
	}
}
