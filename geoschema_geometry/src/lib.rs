//! Validated GeoJSON geometries for structured-data schemas.
//!
//! [`Geometry`] is an immutable value holding one of the seven GeoJSON geometry kinds. It
//! round-trips through the GeoJSON object encoding, renders as well-known text and hashes
//! structurally. A [`KindConstraint`] restricts a field to a subset of kinds, validates
//! decoded values against it, and chooses which JSON Schema fragments describe the field.
//!
//! ```
//! use geoschema_geometry::{Geometry, KindConstraint, Location};
//! use serde_json::json;
//!
//! let geometry = Geometry::from_geojson(&json!({"type": "Point", "coordinates": [1, 2]})).unwrap();
//! assert_eq!(geometry.to_string(), "POINT (1 2)");
//!
//! let constraint = KindConstraint::new(["Polygon", "MultiPolygon"]).unwrap();
//! let err = constraint.validate(&geometry, &Location::root().child("geometry")).unwrap_err();
//! assert_eq!(
//! 	err.message(),
//! 	"geometry type not allowed: 'Point' (allowed values: MultiPolygon, Polygon)"
//! );
//! ```

pub mod binding;
mod constraint;
mod convert;
mod error;
mod geojson;
mod geometry;
mod kind;
pub mod schema;
pub mod types;
mod wkt;

pub use binding::{Constrained, FieldSpec, FieldType, FieldValue, GeometryBinding, Record, RecordSchema, ValueBinding};
pub use constraint::KindConstraint;
pub use error::*;
pub use geometry::{Geometry, Shape};
pub use kind::{GeometryKind, join_kinds};
pub use schema::{geometry_json_schema, kind_json_schema};
