//! Error types.
//!
//! - [`GeometryError`]: a raw value could not be decoded into a [`crate::Geometry`].
//! - [`ConstraintError`]: a schema definition is misconfigured. Raised while building the
//!   schema, never while validating a document.
//! - [`ValidationError`] / [`ValidationErrors`]: per-document failures with a location,
//!   collected across all fields of a document.

use crate::{FieldType, GeometryKind, KindConstraint, join_kinds};
use std::fmt::{Display, Formatter};

/// A raw value could not be decoded into a geometry.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
	#[error("value must be an object; but {found} has type {json_type}")]
	NotAnObject { found: String, json_type: &'static str },

	#[error("{}", unknown_kind_message(.found))]
	UnknownKind { found: Option<String> },

	#[error("invalid {kind}: {message}")]
	InvalidGeometry { kind: GeometryKind, message: String },

	#[error("invalid JSON: {0}")]
	Json(String),
}

fn unknown_kind_message(found: &Option<String>) -> String {
	let allowed = join_kinds(GeometryKind::ALL);
	match found {
		Some(name) => format!("unknown geometry type '{name}' (allowed: {allowed})"),
		None => format!("geometry must have a string 'type' (allowed: {allowed})"),
	}
}

impl GeometryError {
	pub(crate) fn invalid(kind: GeometryKind, error: &anyhow::Error) -> Self {
		GeometryError::InvalidGeometry {
			kind,
			message: format!("{error:#}"),
		}
	}

	pub fn error_kind(&self) -> ErrorKind {
		match self {
			GeometryError::NotAnObject { .. } => ErrorKind::TypeError,
			GeometryError::UnknownKind { .. } | GeometryError::InvalidGeometry { .. } | GeometryError::Json(_) => {
				ErrorKind::ValueError
			}
		}
	}
}

impl From<serde_json::Error> for GeometryError {
	fn from(error: serde_json::Error) -> Self {
		GeometryError::Json(error.to_string())
	}
}

/// A schema definition that cannot be built.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConstraintError {
	#[error("allowed geometry types are empty (must contain at least one of: {})", join_kinds(GeometryKind::ALL))]
	Empty,

	#[error(
		"allowed geometry types contain invalid values: {} (allowed: {})",
		quote_names(.0),
		join_kinds(GeometryKind::ALL)
	)]
	UnknownKinds(Vec<String>),

	#[error("allowed geometry types contain duplicates: {}", kind_list(.0))]
	Duplicates(Vec<GeometryKind>),

	#[error("a geometry type constraint can only be applied to a geometry field; but field '{field}' has type {field_type}")]
	NotGeometry { field: String, field_type: FieldType },

	#[error("field '{0}' is defined more than once")]
	DuplicateField(String),
}

fn kind_list(kinds: &[GeometryKind]) -> String {
	join_kinds(kinds.iter().copied())
}

fn quote_names(names: &[String]) -> String {
	names.iter().map(|n| format!("'{n}'")).collect::<Vec<_>>().join(", ")
}

/// Tag identifying the class of a [`ValidationError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	TypeError,
	ValueError,
	Missing,
	KindNotAllowed,
}

impl ErrorKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ErrorKind::TypeError => "type_error",
			ErrorKind::ValueError => "value_error",
			ErrorKind::Missing => "missing",
			ErrorKind::KindNotAllowed => "geometry_type_not_allowed",
		}
	}
}

impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One step of a [`Location`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LocItem {
	Key(String),
	Index(usize),
}

impl From<&str> for LocItem {
	fn from(key: &str) -> Self {
		LocItem::Key(key.to_string())
	}
}

impl From<String> for LocItem {
	fn from(key: String) -> Self {
		LocItem::Key(key)
	}
}

impl From<usize> for LocItem {
	fn from(index: usize) -> Self {
		LocItem::Index(index)
	}
}

impl Display for LocItem {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			LocItem::Key(key) => f.write_str(key),
			LocItem::Index(index) => write!(f, "{index}"),
		}
	}
}

/// Path of keys and indices pointing at a value inside a document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location(Vec<LocItem>);

impl Location {
	pub fn root() -> Self {
		Self(Vec::new())
	}

	/// Returns a new location one step below this one.
	pub fn child(&self, item: impl Into<LocItem>) -> Self {
		let mut items = self.0.clone();
		items.push(item.into());
		Self(items)
	}

	pub fn items(&self) -> &[LocItem] {
		&self.0
	}

	pub fn is_root(&self) -> bool {
		self.0.is_empty()
	}
}

impl<T: Into<LocItem>> FromIterator<T> for Location {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

impl Display for Location {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let parts = self.0.iter().map(ToString::to_string).collect::<Vec<_>>();
		f.write_str(&parts.join("."))
	}
}

/// What went wrong at a [`Location`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ErrorDetail {
	#[error("invalid geometry value: {0}")]
	Geometry(#[from] GeometryError),

	#[error("geometry type not allowed: '{found}' (allowed values: {allowed})")]
	KindNotAllowed { found: GeometryKind, allowed: KindConstraint },

	#[error("field required")]
	Missing,

	#[error("expected {expected}; but found {found}")]
	WrongType { expected: &'static str, found: &'static str },
}

/// A single per-document validation failure.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationError {
	pub loc: Location,
	pub detail: ErrorDetail,
}

impl ValidationError {
	pub fn new(loc: Location, detail: impl Into<ErrorDetail>) -> Self {
		Self {
			loc,
			detail: detail.into(),
		}
	}

	pub fn kind(&self) -> ErrorKind {
		match &self.detail {
			ErrorDetail::Geometry(error) => error.error_kind(),
			ErrorDetail::KindNotAllowed { .. } => ErrorKind::KindNotAllowed,
			ErrorDetail::Missing => ErrorKind::Missing,
			ErrorDetail::WrongType { .. } => ErrorKind::TypeError,
		}
	}

	pub fn message(&self) -> String {
		self.detail.to_string()
	}
}

impl Display for ValidationError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.loc.is_root() {
			write!(f, "{} [{}]", self.detail, self.kind())
		} else {
			write!(f, "{}: {} [{}]", self.loc, self.detail, self.kind())
		}
	}
}

impl std::error::Error for ValidationError {}

/// All validation failures of one document, in the order they were found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
	pub fn new() -> Self {
		Self(Vec::new())
	}

	pub fn push(&mut self, error: ValidationError) {
		self.0.push(error);
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
		self.0.iter()
	}

	pub fn as_slice(&self) -> &[ValidationError] {
		&self.0
	}

	/// `Ok(value)` if nothing was collected, otherwise `Err(self)`.
	pub fn into_result<T>(self, value: T) -> Result<T, Self> {
		if self.0.is_empty() { Ok(value) } else { Err(self) }
	}
}

impl From<ValidationError> for ValidationErrors {
	fn from(error: ValidationError) -> Self {
		Self(vec![error])
	}
}

impl Extend<ValidationError> for ValidationErrors {
	fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
		self.0.extend(iter);
	}
}

impl IntoIterator for ValidationErrors {
	type Item = ValidationError;
	type IntoIter = std::vec::IntoIter<ValidationError>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl Display for ValidationErrors {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let plural = if self.0.len() == 1 { "" } else { "s" };
		write!(f, "{} validation error{plural}", self.0.len())?;
		for error in &self.0 {
			write!(f, "\n  {error}")?;
		}
		Ok(())
	}
}

impl std::error::Error for ValidationErrors {}
