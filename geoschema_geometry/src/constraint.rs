//! Restricting a geometry field to a subset of kinds.

use crate::{
	ConstraintError, ErrorDetail, Geometry, GeometryKind, Location, ValidationError,
	binding::{Constrained, ValueBinding},
	join_kinds,
	schema::{kind_json_schema, one_of},
};
use enumset::EnumSet;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt::{Debug, Display, Formatter};

/// An immutable, non-empty set of allowed [`GeometryKind`]s.
///
/// Kinds are kept in canonical (alphabetical) order, so two constraints built from the
/// same kinds in a different order are equal and render identically.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindConstraint {
	kinds: EnumSet<GeometryKind>,
}

impl KindConstraint {
	/// Builds a constraint from kind names.
	///
	/// Fails if no name is given, if any name is not a geometry kind (all unknown names
	/// are reported) or if a kind is listed twice.
	pub fn new<I>(names: I) -> Result<Self, ConstraintError>
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		let names = names
			.into_iter()
			.map(|name| name.as_ref().to_string())
			.collect::<Vec<_>>();
		if names.is_empty() {
			return Err(ConstraintError::Empty);
		}

		let unknown = names
			.iter()
			.filter(|name| GeometryKind::from_name(name).is_none())
			.cloned()
			.collect::<Vec<_>>();
		if !unknown.is_empty() {
			return Err(ConstraintError::UnknownKinds(unknown));
		}

		Self::from_kinds(names.iter().filter_map(|name| GeometryKind::from_name(name)))
	}

	/// Builds a constraint from kinds, rejecting an empty list and duplicates.
	pub fn from_kinds(kinds: impl IntoIterator<Item = GeometryKind>) -> Result<Self, ConstraintError> {
		let mut set = EnumSet::new();
		let mut duplicates = EnumSet::new();
		for kind in kinds {
			if !set.insert(kind) {
				duplicates.insert(kind);
			}
		}

		if set.is_empty() {
			return Err(ConstraintError::Empty);
		}
		if !duplicates.is_empty() {
			return Err(ConstraintError::Duplicates(duplicates.iter().collect()));
		}

		debug!("built geometry kind constraint: {}", join_kinds(set));
		Ok(Self { kinds: set })
	}

	/// Allows every kind. This is what an unconstrained geometry field accepts.
	#[must_use]
	pub fn all() -> Self {
		Self {
			kinds: GeometryKind::all(),
		}
	}

	#[must_use]
	pub fn single(kind: GeometryKind) -> Self {
		Self {
			kinds: EnumSet::only(kind),
		}
	}

	/// The allowed kinds in canonical order.
	#[must_use]
	pub fn kinds(&self) -> Vec<GeometryKind> {
		self.kinds.iter().collect()
	}

	#[must_use]
	pub fn as_set(&self) -> EnumSet<GeometryKind> {
		self.kinds
	}

	#[must_use]
	pub fn contains(&self, kind: GeometryKind) -> bool {
		self.kinds.contains(kind)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.kinds.len()
	}

	/// Never `true` for a constraint that was built successfully.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.kinds.is_empty()
	}

	/// Accepts `geometry` if its kind is allowed, otherwise reports the offending kind and
	/// the allowed set at `loc`.
	pub fn validate(&self, geometry: &Geometry, loc: &Location) -> Result<(), ValidationError> {
		let kind = geometry.kind();
		if self.contains(kind) {
			return Ok(());
		}
		debug!("{loc}: geometry kind {kind} is not one of {}", self);
		Err(ValidationError::new(
			loc.clone(),
			ErrorDetail::KindNotAllowed {
				found: kind,
				allowed: *self,
			},
		))
	}

	/// The fragment of the only allowed kind, or a `oneOf` over the fragments of all
	/// allowed kinds in canonical order.
	#[must_use]
	pub fn json_schema(&self) -> Value {
		let mut kinds = self.kinds.iter();
		match (kinds.next(), kinds.next()) {
			(Some(kind), None) => kind_json_schema(kind).clone(),
			_ => one_of(self.kinds.iter().map(kind_json_schema)),
		}
	}

	/// Wraps a geometry binding so that every loaded value is also checked against this
	/// constraint.
	pub fn attach<B>(self, inner: B) -> Constrained<B>
	where
		B: ValueBinding<Value = Geometry>,
	{
		Constrained::new(inner, self)
	}
}

impl Display for KindConstraint {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&join_kinds(self.kinds))
	}
}

impl Debug for KindConstraint {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_set().entries(self.kinds.iter()).finish()
	}
}

impl Serialize for KindConstraint {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_seq(self.kinds.iter().map(|kind| kind.as_str()))
	}
}

impl<'de> Deserialize<'de> for KindConstraint {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let names = Vec::<String>::deserialize(deserializer)?;
		KindConstraint::new(names).map_err(serde::de::Error::custom)
	}
}
