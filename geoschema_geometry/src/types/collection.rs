use super::*;
use crate::{
	Geometry, GeometryKind,
	wkt::{write_geometry, write_wkt_list},
};
use anyhow::{Result, bail, ensure};
use serde_json::Value;
use std::fmt::Debug;

/// An ordered list of geometries of any non-collection kind. May be empty.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GeometryCollection(Vec<Geometry>);

impl GeometryTrait for GeometryCollection {
	/// Parses the `geometries` member. A nested collection is rejected before it is decoded.
	fn from_coord_json(json: &Value) -> Result<Self> {
		parse_json_list(json, "geometry", |member| {
			if member.get("type").and_then(Value::as_str) == Some(GeometryKind::GeometryCollection.as_str()) {
				bail!("a geometry collection must not contain another geometry collection");
			}
			Ok(Geometry::from_geojson(member)?)
		})
		.map(Self)
	}

	fn to_coord_json(&self) -> Value {
		Value::Array(self.0.iter().map(Geometry::to_geojson).collect())
	}

	/// Members are [`Geometry`] values and thus verified already, only the nesting is checked.
	fn verify(&self) -> Result<()> {
		verify_list(&self.0, "geometry", |member| {
			ensure!(
				!member.kind().is_collection(),
				"a geometry collection must not contain another geometry collection"
			);
			Ok(())
		})
	}

	/// Writes `(POINT (1 2), LINESTRING (0 0, 1 1))`; the `EMPTY` case is left to the caller.
	fn write_wkt(&self, out: &mut String) {
		write_wkt_list(out, &self.0, write_geometry);
	}

	fn has_z(&self) -> bool {
		self.0.iter().any(Geometry::has_z)
	}

	fn all_z(&self) -> bool {
		self.0.iter().all(|member| member.shape().all_z())
	}
}

impl Debug for GeometryCollection {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_composite!(GeometryCollection, Geometry);
