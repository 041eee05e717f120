use crate::{GeometryError, GeometryKind, KindConstraint, types::*};
use anyhow::ensure;
use serde_json::Value;
use std::fmt::Debug;

/// The shape inside a [`Geometry`], one variant per kind.
///
/// A `Shape` may be built freely and is not verified. Turning it into a [`Geometry`]
/// with `Geometry::try_from` verifies it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Shape {
	Point(PointGeometry),
	LineString(LineStringGeometry),
	Polygon(PolygonGeometry),
	MultiPoint(MultiPointGeometry),
	MultiLineString(MultiLineStringGeometry),
	MultiPolygon(MultiPolygonGeometry),
	GeometryCollection(GeometryCollection),
}

impl Shape {
	#[must_use]
	pub fn kind(&self) -> GeometryKind {
		match self {
			Shape::Point(_) => GeometryKind::Point,
			Shape::LineString(_) => GeometryKind::LineString,
			Shape::Polygon(_) => GeometryKind::Polygon,
			Shape::MultiPoint(_) => GeometryKind::MultiPoint,
			Shape::MultiLineString(_) => GeometryKind::MultiLineString,
			Shape::MultiPolygon(_) => GeometryKind::MultiPolygon,
			Shape::GeometryCollection(_) => GeometryKind::GeometryCollection,
		}
	}

	fn as_trait(&self) -> &dyn ShapeView {
		match self {
			Shape::Point(g) => g,
			Shape::LineString(g) => g,
			Shape::Polygon(g) => g,
			Shape::MultiPoint(g) => g,
			Shape::MultiLineString(g) => g,
			Shape::MultiPolygon(g) => g,
			Shape::GeometryCollection(g) => g,
		}
	}

	#[must_use]
	pub fn has_z(&self) -> bool {
		self.as_trait().has_z()
	}

	/// Whether every position carries a `z` value.
	#[must_use]
	pub fn all_z(&self) -> bool {
		self.as_trait().all_z()
	}

	/// Checks the structural rules of the shape: minimum counts, closed rings, finite
	/// numbers, no nested collections, and either all or none of the positions of a
	/// non-collection shape carrying `z`.
	pub(crate) fn verify(&self) -> anyhow::Result<()> {
		self.as_trait().verify()?;
		if !self.kind().is_collection() {
			ensure!(
				!self.has_z() || self.all_z(),
				"positions must either all have a z value or none"
			);
		}
		Ok(())
	}

	pub(crate) fn write_wkt(&self, out: &mut String) {
		self.as_trait().write_wkt(out);
	}

	pub(crate) fn to_coord_json(&self) -> Value {
		self.as_trait().to_coord_json()
	}
}

/// Object-safe part of [`GeometryTrait`] used to dispatch over the variants of a [`Shape`].
trait ShapeView {
	fn to_coord_json(&self) -> Value;
	fn verify(&self) -> anyhow::Result<()>;
	fn write_wkt(&self, out: &mut String);
	fn has_z(&self) -> bool;
	fn all_z(&self) -> bool;
}

impl<T: GeometryTrait> ShapeView for T {
	fn to_coord_json(&self) -> Value {
		GeometryTrait::to_coord_json(self)
	}
	fn verify(&self) -> anyhow::Result<()> {
		GeometryTrait::verify(self)
	}
	fn write_wkt(&self, out: &mut String) {
		GeometryTrait::write_wkt(self, out);
	}
	fn has_z(&self) -> bool {
		GeometryTrait::has_z(self)
	}
	fn all_z(&self) -> bool {
		GeometryTrait::all_z(self)
	}
}

impl Debug for Shape {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner: &dyn Debug = match self {
			Shape::Point(g) => g,
			Shape::LineString(g) => g,
			Shape::Polygon(g) => g,
			Shape::MultiPoint(g) => g,
			Shape::MultiLineString(g) => g,
			Shape::MultiPolygon(g) => g,
			Shape::GeometryCollection(g) => g,
		};
		f.debug_tuple(self.kind().as_str()).field(inner).finish()
	}
}

/// A validated GeoJSON geometry: exactly one shape of one of the seven kinds.
///
/// The only ways to get one are the GeoJSON decoder, the `new_*` constructors and
/// `TryFrom<shape>`, and all of them run [`Geometry::verify`]. The shape can be read
/// through [`Geometry::shape`] but never changed. Equality and hashing are structural
/// with exact comparison of coordinates.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Geometry(Shape);

impl Geometry {
	pub fn new_point<T>(value: T) -> Result<Self, GeometryError>
	where
		PointGeometry: From<T>,
	{
		Self::try_from(PointGeometry::from(value))
	}

	pub fn new_line_string<T>(value: T) -> Result<Self, GeometryError>
	where
		LineStringGeometry: From<T>,
	{
		Self::try_from(LineStringGeometry::from(value))
	}

	pub fn new_polygon<T>(value: T) -> Result<Self, GeometryError>
	where
		PolygonGeometry: From<T>,
	{
		Self::try_from(PolygonGeometry::from(value))
	}

	pub fn new_multi_point<T>(value: T) -> Result<Self, GeometryError>
	where
		MultiPointGeometry: From<T>,
	{
		Self::try_from(MultiPointGeometry::from(value))
	}

	pub fn new_multi_line_string<T>(value: T) -> Result<Self, GeometryError>
	where
		MultiLineStringGeometry: From<T>,
	{
		Self::try_from(MultiLineStringGeometry::from(value))
	}

	pub fn new_multi_polygon<T>(value: T) -> Result<Self, GeometryError>
	where
		MultiPolygonGeometry: From<T>,
	{
		Self::try_from(MultiPolygonGeometry::from(value))
	}

	pub fn new_collection(members: Vec<Geometry>) -> Result<Self, GeometryError> {
		Self::try_from(GeometryCollection::from(members))
	}

	/// Wraps a shape that has already been verified.
	pub(crate) fn from_verified(shape: Shape) -> Self {
		Self(shape)
	}

	#[must_use]
	pub fn shape(&self) -> &Shape {
		&self.0
	}

	#[must_use]
	pub fn into_shape(self) -> Shape {
		self.0
	}

	#[must_use]
	pub fn kind(&self) -> GeometryKind {
		self.0.kind()
	}

	/// The GeoJSON `type` name, e.g. `"MultiPolygon"`.
	#[must_use]
	pub fn type_name(&self) -> &'static str {
		self.kind().as_str()
	}

	#[must_use]
	pub fn has_z(&self) -> bool {
		self.0.has_z()
	}

	/// Checks the structural rules of the shape again. Always passes for a value that
	/// exists, since every constructor already ran it.
	pub fn verify(&self) -> Result<(), GeometryError> {
		self.0.verify().map_err(|e| GeometryError::invalid(self.kind(), &e))
	}

	/// Wraps a single point, line string or polygon into its multi kind.
	/// Multi kinds and collections are returned unchanged.
	#[must_use]
	pub fn into_multi(self) -> Self {
		match self.0 {
			Shape::Point(g) => Self(Shape::MultiPoint(g.into_multi())),
			Shape::LineString(g) => Self(Shape::MultiLineString(g.into_multi())),
			Shape::Polygon(g) => Self(Shape::MultiPolygon(g.into_multi())),
			shape @ (Shape::MultiPoint(_)
			| Shape::MultiLineString(_)
			| Shape::MultiPolygon(_)
			| Shape::GeometryCollection(_)) => Self(shape),
		}
	}

	/// JSON Schema accepting any of the seven kinds.
	#[must_use]
	pub fn json_schema() -> Value {
		KindConstraint::all().json_schema()
	}
}

impl TryFrom<Shape> for Geometry {
	type Error = GeometryError;

	fn try_from(shape: Shape) -> Result<Self, Self::Error> {
		shape.verify().map_err(|e| GeometryError::invalid(shape.kind(), &e))?;
		Ok(Self(shape))
	}
}

macro_rules! impl_try_from_shape {
	($($variant:ident($shape:ty)),*) => {$(
		impl TryFrom<$shape> for Geometry {
			type Error = GeometryError;

			fn try_from(shape: $shape) -> Result<Self, Self::Error> {
				Geometry::try_from(Shape::$variant(shape))
			}
		}
	)*};
}

impl_try_from_shape!(
	Point(PointGeometry),
	LineString(LineStringGeometry),
	Polygon(PolygonGeometry),
	MultiPoint(MultiPointGeometry),
	MultiLineString(MultiLineStringGeometry),
	MultiPolygon(MultiPolygonGeometry),
	GeometryCollection(GeometryCollection)
);

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}
