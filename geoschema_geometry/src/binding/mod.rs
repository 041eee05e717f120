//! Plugging geometry values into a schema host.
//!
//! A [`ValueBinding`] is everything a host needs to handle one field type: decode a raw
//! JSON value, validate it, encode it back and describe it as JSON Schema.
//! [`GeometryBinding`] handles unconstrained geometries, [`Constrained`] decorates any
//! geometry binding with a [`KindConstraint`]. [`RecordSchema`] is a small host that uses
//! both to validate whole documents.

mod record;

pub use record::*;

use crate::{Geometry, KindConstraint, Location, ValidationError};
use serde_json::Value;

pub trait ValueBinding {
	type Value;

	/// Turns a raw value into a typed one. `loc` is only used for error reporting.
	fn decode(&self, raw: &Value, loc: &Location) -> Result<Self::Value, ValidationError>;

	fn encode(&self, value: &Self::Value) -> Value;

	/// Checks a decoded value. Must not change it.
	fn validate(&self, value: &Self::Value, loc: &Location) -> Result<(), ValidationError>;

	fn json_schema(&self) -> Value;

	/// Decodes, then validates.
	fn load(&self, raw: &Value, loc: &Location) -> Result<Self::Value, ValidationError> {
		let value = self.decode(raw, loc)?;
		self.validate(&value, loc)?;
		Ok(value)
	}
}

/// Binding of an unconstrained [`Geometry`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeometryBinding;

impl ValueBinding for GeometryBinding {
	type Value = Geometry;

	fn decode(&self, raw: &Value, loc: &Location) -> Result<Geometry, ValidationError> {
		Geometry::from_geojson(raw).map_err(|e| ValidationError::new(loc.clone(), e))
	}

	fn encode(&self, value: &Geometry) -> Value {
		value.to_geojson()
	}

	fn validate(&self, _value: &Geometry, _loc: &Location) -> Result<(), ValidationError> {
		Ok(())
	}

	fn json_schema(&self) -> Value {
		Geometry::json_schema()
	}
}

/// A geometry binding restricted to the kinds of a [`KindConstraint`].
///
/// Decoding and encoding are delegated to the inner binding; validation runs the inner
/// validation first and the kind check second. The schema lists only the allowed kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constrained<B> {
	inner: B,
	constraint: KindConstraint,
}

impl<B> Constrained<B>
where
	B: ValueBinding<Value = Geometry>,
{
	pub fn new(inner: B, constraint: KindConstraint) -> Self {
		Self { inner, constraint }
	}

	pub fn constraint(&self) -> &KindConstraint {
		&self.constraint
	}
}

impl<B> ValueBinding for Constrained<B>
where
	B: ValueBinding<Value = Geometry>,
{
	type Value = Geometry;

	fn decode(&self, raw: &Value, loc: &Location) -> Result<Geometry, ValidationError> {
		self.inner.decode(raw, loc)
	}

	fn encode(&self, value: &Geometry) -> Value {
		self.inner.encode(value)
	}

	fn validate(&self, value: &Geometry, loc: &Location) -> Result<(), ValidationError> {
		self.inner.validate(value, loc)?;
		self.constraint.validate(value, loc)
	}

	fn json_schema(&self) -> Value {
		self.constraint.json_schema()
	}
}
