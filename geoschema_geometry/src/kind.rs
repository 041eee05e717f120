//! The closed set of GeoJSON geometry kinds.
//!
//! Variants are declared in lexicographic order of their names, so `Ord`, `EnumSet`
//! iteration and every list rendered from a set of kinds share one canonical order.

use crate::GeometryError;
use enumset::{EnumSet, EnumSetType};
use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

#[derive(Debug, EnumSetType, PartialOrd, Ord, Hash)]
pub enum GeometryKind {
	GeometryCollection,
	LineString,
	MultiLineString,
	MultiPoint,
	MultiPolygon,
	Point,
	Polygon,
}

impl GeometryKind {
	/// All seven kinds in canonical order.
	pub const ALL: [GeometryKind; 7] = [
		GeometryKind::GeometryCollection,
		GeometryKind::LineString,
		GeometryKind::MultiLineString,
		GeometryKind::MultiPoint,
		GeometryKind::MultiPolygon,
		GeometryKind::Point,
		GeometryKind::Polygon,
	];

	/// The GeoJSON `type` name of this kind.
	pub fn as_str(&self) -> &'static str {
		use GeometryKind::*;
		match self {
			GeometryCollection => "GeometryCollection",
			LineString => "LineString",
			MultiLineString => "MultiLineString",
			MultiPoint => "MultiPoint",
			MultiPolygon => "MultiPolygon",
			Point => "Point",
			Polygon => "Polygon",
		}
	}

	/// Looks up a kind by its exact GeoJSON `type` name.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.as_str() == name)
	}

	/// The keyword used for this kind in well-known text.
	pub fn wkt_tag(&self) -> &'static str {
		use GeometryKind::*;
		match self {
			GeometryCollection => "GEOMETRYCOLLECTION",
			LineString => "LINESTRING",
			MultiLineString => "MULTILINESTRING",
			MultiPoint => "MULTIPOINT",
			MultiPolygon => "MULTIPOLYGON",
			Point => "POINT",
			Polygon => "POLYGON",
		}
	}

	/// The GeoJSON member holding the shape data: `geometries` for collections,
	/// `coordinates` for everything else.
	pub fn member_name(&self) -> &'static str {
		if self.is_collection() {
			"geometries"
		} else {
			"coordinates"
		}
	}

	pub fn is_collection(&self) -> bool {
		matches!(self, GeometryKind::GeometryCollection)
	}

	/// Every kind as an `EnumSet`.
	pub fn all() -> EnumSet<GeometryKind> {
		EnumSet::all()
	}
}

/// Joins kind names with `", "` in canonical order.
pub fn join_kinds(kinds: impl IntoIterator<Item = GeometryKind>) -> String {
	kinds.into_iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
}

impl Display for GeometryKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for GeometryKind {
	type Err = GeometryError;

	fn from_str(name: &str) -> Result<Self, Self::Err> {
		Self::from_name(name).ok_or_else(|| GeometryError::UnknownKind {
			found: Some(name.to_string()),
		})
	}
}
