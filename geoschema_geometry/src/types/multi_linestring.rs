use super::*;
use crate::wkt::write_wkt_list;
use anyhow::{Result, ensure};
use serde_json::Value;
use std::fmt::Debug;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MultiLineStringGeometry(Vec<LineStringGeometry>);

impl GeometryTrait for MultiLineStringGeometry {
	fn from_coord_json(json: &Value) -> Result<Self> {
		parse_json_list(json, "line string", LineStringGeometry::from_coord_json).map(Self)
	}

	fn to_coord_json(&self) -> Value {
		Value::Array(self.0.iter().map(LineStringGeometry::to_coord_json).collect())
	}

	fn verify(&self) -> Result<()> {
		ensure!(!self.0.is_empty(), "a multi line string must have at least one line string");
		verify_list(&self.0, "line string", LineStringGeometry::verify)
	}

	fn write_wkt(&self, out: &mut String) {
		write_wkt_list(out, &self.0, LineStringGeometry::write_wkt);
	}

	fn has_z(&self) -> bool {
		self.0.iter().any(LineStringGeometry::has_z)
	}

	fn all_z(&self) -> bool {
		self.0.iter().all(LineStringGeometry::all_z)
	}
}

impl Debug for MultiLineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_composite!(MultiLineStringGeometry, LineStringGeometry);

impl From<geo::MultiLineString<f64>> for MultiLineStringGeometry {
	fn from(geometry: geo::MultiLineString<f64>) -> Self {
		Self(geometry.0.into_iter().map(LineStringGeometry::from).collect())
	}
}

impl From<&MultiLineStringGeometry> for geo::MultiLineString<f64> {
	fn from(geometry: &MultiLineStringGeometry) -> Self {
		geo::MultiLineString(geometry.0.iter().map(geo::LineString::from).collect())
	}
}
