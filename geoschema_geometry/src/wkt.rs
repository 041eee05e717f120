//! Well-known-text rendering.
//!
//! Numbers are written with the shortest representation that reads back to the same
//! `f64`, so the text is lossless: `POINT (1 2.5)`, `POINT Z (1 2 3)`.

use crate::{
	Geometry, Shape,
	types::{CompositeGeometryTrait, Coordinates},
};
use std::fmt::{Display, Formatter};

/// Writes `x y` or `x y z`.
pub(crate) fn write_position(out: &mut String, position: &Coordinates) {
	for (index, value) in position.values().enumerate() {
		if index > 0 {
			out.push(' ');
		}
		out.push_str(&value.to_string());
	}
}

/// Writes `(x y, x y, ...)`.
pub(crate) fn write_position_list(out: &mut String, positions: &[Coordinates]) {
	write_wkt_list(out, positions, |position, out| write_position(out, position));
}

/// Writes `(a, b, c)` where each element renders itself.
pub(crate) fn write_wkt_list<T>(out: &mut String, items: &[T], write: impl Fn(&T, &mut String)) {
	out.push('(');
	for (index, item) in items.iter().enumerate() {
		if index > 0 {
			out.push_str(", ");
		}
		write(item, out);
	}
	out.push(')');
}

/// Writes the tagged text of a whole geometry, e.g. `LINESTRING Z (0 0 1, 1 1 1)`.
pub(crate) fn write_geometry(geometry: &Geometry, out: &mut String) {
	out.push_str(geometry.kind().wkt_tag());

	if let Shape::GeometryCollection(collection) = geometry.shape() {
		if collection.is_empty() {
			out.push_str(" EMPTY");
			return;
		}
	} else if geometry.has_z() {
		out.push_str(" Z");
	}

	out.push(' ');
	geometry.shape().write_wkt(out);
}

impl Geometry {
	/// Renders the geometry as well-known text. Same as `to_string()`.
	#[must_use]
	pub fn to_wkt(&self) -> String {
		let mut out = String::new();
		write_geometry(self, &mut out);
		out
	}
}

impl Display for Geometry {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.to_wkt())
	}
}
