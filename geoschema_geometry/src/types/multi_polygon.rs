use super::*;
use crate::wkt::write_wkt_list;
use anyhow::{Result, ensure};
use serde_json::Value;
use std::fmt::Debug;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MultiPolygonGeometry(Vec<PolygonGeometry>);

impl GeometryTrait for MultiPolygonGeometry {
	fn from_coord_json(json: &Value) -> Result<Self> {
		parse_json_list(json, "polygon", PolygonGeometry::from_coord_json).map(Self)
	}

	fn to_coord_json(&self) -> Value {
		Value::Array(self.0.iter().map(PolygonGeometry::to_coord_json).collect())
	}

	fn verify(&self) -> Result<()> {
		ensure!(!self.0.is_empty(), "a multi polygon must have at least one polygon");
		verify_list(&self.0, "polygon", PolygonGeometry::verify)
	}

	fn write_wkt(&self, out: &mut String) {
		write_wkt_list(out, &self.0, PolygonGeometry::write_wkt);
	}

	fn has_z(&self) -> bool {
		self.0.iter().any(PolygonGeometry::has_z)
	}

	fn all_z(&self) -> bool {
		self.0.iter().all(PolygonGeometry::all_z)
	}
}

impl Debug for MultiPolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_composite!(MultiPolygonGeometry, PolygonGeometry);

impl From<geo::MultiPolygon<f64>> for MultiPolygonGeometry {
	fn from(geometry: geo::MultiPolygon<f64>) -> Self {
		Self(geometry.0.into_iter().map(PolygonGeometry::from).collect())
	}
}

impl From<&MultiPolygonGeometry> for geo::MultiPolygon<f64> {
	fn from(geometry: &MultiPolygonGeometry) -> Self {
		geo::MultiPolygon(geometry.0.iter().map(geo::Polygon::from).collect())
	}
}
