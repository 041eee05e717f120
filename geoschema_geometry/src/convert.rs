//! Conversions between [`Geometry`] and the `geo` crate's geometry types.
//!
//! `geo` has no third dimension, so `z` values are dropped on the way out.

use crate::{Geometry, GeometryError, GeometryKind, Shape, types::*};

impl From<&Geometry> for geo::Geometry<f64> {
	fn from(geometry: &Geometry) -> Self {
		match geometry.shape() {
			Shape::Point(g) => geo::Geometry::Point(geo::Point(geo::Coord::from(g.as_coord()))),
			Shape::LineString(g) => geo::Geometry::LineString(g.into()),
			Shape::Polygon(g) => geo::Geometry::Polygon(g.into()),
			Shape::MultiPoint(g) => geo::Geometry::MultiPoint(g.into()),
			Shape::MultiLineString(g) => geo::Geometry::MultiLineString(g.into()),
			Shape::MultiPolygon(g) => geo::Geometry::MultiPolygon(g.into()),
			Shape::GeometryCollection(g) => {
				geo::Geometry::GeometryCollection(g.iter().map(geo::Geometry::from).collect())
			}
		}
	}
}

/// `Line`, `Rect` and `Triangle` become a line string or polygon. The result is verified,
/// so e.g. an empty `geo` line string is rejected.
impl TryFrom<geo::Geometry<f64>> for Geometry {
	type Error = GeometryError;

	fn try_from(geometry: geo::Geometry<f64>) -> Result<Self, Self::Error> {
		match geometry {
			geo::Geometry::Point(g) => Geometry::try_from(PointGeometry::from(g.0)),
			geo::Geometry::Line(g) => Geometry::try_from(LineStringGeometry::from(geo::LineString::from(vec![
				g.start, g.end,
			]))),
			geo::Geometry::LineString(g) => Geometry::try_from(LineStringGeometry::from(g)),
			geo::Geometry::Polygon(g) => Geometry::try_from(PolygonGeometry::from(g)),
			geo::Geometry::MultiPoint(g) => Geometry::try_from(MultiPointGeometry::from(g)),
			geo::Geometry::MultiLineString(g) => Geometry::try_from(MultiLineStringGeometry::from(g)),
			geo::Geometry::MultiPolygon(g) => Geometry::try_from(MultiPolygonGeometry::from(g)),
			geo::Geometry::Rect(g) => Geometry::try_from(PolygonGeometry::from(g.to_polygon())),
			geo::Geometry::Triangle(g) => Geometry::try_from(PolygonGeometry::from(g.to_polygon())),
			geo::Geometry::GeometryCollection(g) => {
				let members = g
					.0
					.into_iter()
					.map(|member| {
						if matches!(member, geo::Geometry::GeometryCollection(_)) {
							return Err(GeometryError::InvalidGeometry {
								kind: GeometryKind::GeometryCollection,
								message: "a geometry collection must not contain another geometry collection".to_string(),
							});
						}
						Geometry::try_from(member)
					})
					.collect::<Result<Vec<_>, _>>()?;
				Geometry::new_collection(members)
			}
		}
	}
}
