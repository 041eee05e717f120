use super::{GeometryBinding, ValueBinding};
use crate::{
	ConstraintError, ErrorDetail, Geometry, KindConstraint, Location, ValidationError, ValidationErrors,
	geojson::json_type,
};
use anyhow::{Context, Result};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::{
	collections::HashSet,
	fmt::{Display, Formatter},
};

/// Declared type of a record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
	Geometry,
	String,
	Number,
	Integer,
	Boolean,
}

impl FieldType {
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldType::Geometry => "geometry",
			FieldType::String => "string",
			FieldType::Number => "number",
			FieldType::Integer => "integer",
			FieldType::Boolean => "boolean",
		}
	}

	/// How a value of this type is described in a type mismatch.
	fn expected(&self) -> &'static str {
		match self {
			FieldType::Geometry => "an object",
			FieldType::String => "a string",
			FieldType::Number => "a number",
			FieldType::Integer => "an integer",
			FieldType::Boolean => "a boolean",
		}
	}
}

impl Display for FieldType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A decoded field value.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
	Geometry(Geometry),
	String(String),
	Number(f64),
	Integer(i64),
	Boolean(bool),
}

impl FieldValue {
	pub fn as_geometry(&self) -> Option<&Geometry> {
		match self {
			FieldValue::Geometry(geometry) => Some(geometry),
			_ => None,
		}
	}
}

/// One named field of a [`RecordSchema`].
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
	name: String,
	field_type: FieldType,
	constraint: Option<KindConstraint>,
	required: bool,
}

impl FieldSpec {
	/// A required field without constraint.
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			constraint: None,
			required: true,
		}
	}

	#[must_use]
	pub fn with_required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	/// Restricts the geometry kinds accepted by this field.
	///
	/// Fails with [`ConstraintError::NotGeometry`] unless the field is declared as
	/// [`FieldType::Geometry`].
	pub fn with_constraint(mut self, constraint: KindConstraint) -> Result<Self, ConstraintError> {
		if self.field_type != FieldType::Geometry {
			return Err(ConstraintError::NotGeometry {
				field: self.name,
				field_type: self.field_type,
			});
		}
		self.constraint = Some(constraint);
		Ok(self)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn field_type(&self) -> FieldType {
		self.field_type
	}

	pub fn constraint(&self) -> Option<&KindConstraint> {
		self.constraint.as_ref()
	}

	pub fn is_required(&self) -> bool {
		self.required
	}

	fn load(&self, raw: &Value, loc: &Location) -> Result<FieldValue, ValidationError> {
		let wrong_type = || {
			ValidationError::new(
				loc.clone(),
				ErrorDetail::WrongType {
					expected: self.field_type.expected(),
					found: json_type(raw),
				},
			)
		};

		match self.field_type {
			FieldType::Geometry => match self.constraint {
				Some(constraint) => constraint.attach(GeometryBinding).load(raw, loc),
				None => GeometryBinding.load(raw, loc),
			}
			.map(FieldValue::Geometry),
			FieldType::String => raw
				.as_str()
				.map(|text| FieldValue::String(text.to_string()))
				.ok_or_else(wrong_type),
			FieldType::Number => raw.as_f64().map(FieldValue::Number).ok_or_else(wrong_type),
			FieldType::Integer => raw.as_i64().map(FieldValue::Integer).ok_or_else(wrong_type),
			FieldType::Boolean => raw.as_bool().map(FieldValue::Boolean).ok_or_else(wrong_type),
		}
	}

	fn encode(value: &FieldValue) -> Value {
		match value {
			FieldValue::Geometry(geometry) => GeometryBinding.encode(geometry),
			FieldValue::String(text) => Value::from(text.as_str()),
			FieldValue::Number(number) => Value::from(*number),
			FieldValue::Integer(number) => Value::from(*number),
			FieldValue::Boolean(flag) => Value::from(*flag),
		}
	}

	/// An optional field also accepts `null`, the same as [`RecordSchema::validate`] does.
	pub fn json_schema(&self) -> Value {
		let geometry = match (self.field_type, &self.constraint) {
			(FieldType::Geometry, Some(constraint)) => constraint.attach(GeometryBinding).json_schema(),
			(FieldType::Geometry, None) => GeometryBinding.json_schema(),
			(field_type, _) if self.required => return json!({ "type": field_type.as_str() }),
			(field_type, _) => return json!({ "type": [field_type.as_str(), "null"] }),
		};
		if self.required {
			geometry
		} else {
			json!({ "anyOf": [geometry, {"type": "null"}] })
		}
	}
}

/// A document that passed [`RecordSchema::validate`]. Fields are kept in declaration
/// order; absent optional fields are left out.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
	values: Vec<(String, FieldValue)>,
}

impl Record {
	pub fn get(&self, name: &str) -> Option<&FieldValue> {
		self.values.iter().find(|(key, _)| key == name).map(|(_, value)| value)
	}

	pub fn geometry(&self, name: &str) -> Option<&Geometry> {
		self.get(name).and_then(FieldValue::as_geometry)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
		self.values.iter().map(|(key, value)| (key.as_str(), value))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Encodes the record back into a JSON object.
	pub fn to_json(&self) -> Value {
		let object = self
			.values
			.iter()
			.map(|(key, value)| (key.clone(), FieldSpec::encode(value)))
			.collect::<Map<_, _>>();
		Value::Object(object)
	}
}

/// A named list of fields that validates JSON documents.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordSchema {
	name: String,
	fields: Vec<FieldSpec>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordDefinition {
	name: String,
	fields: Vec<FieldDefinition>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDefinition {
	name: String,
	#[serde(rename = "type")]
	field_type: FieldType,
	#[serde(default)]
	allowed: Option<KindConstraint>,
	#[serde(default = "default_required")]
	required: bool,
}

fn default_required() -> bool {
	true
}

impl RecordSchema {
	/// Fails with [`ConstraintError::DuplicateField`] if two fields share a name.
	pub fn new(name: impl Into<String>, fields: Vec<FieldSpec>) -> Result<Self, ConstraintError> {
		let mut seen = HashSet::new();
		for field in &fields {
			if !seen.insert(field.name()) {
				return Err(ConstraintError::DuplicateField(field.name().to_string()));
			}
		}

		let name = name.into();
		debug!("built record schema '{name}' with {} fields", fields.len());
		Ok(Self { name, fields })
	}

	/// Loads a record definition from YAML:
	///
	/// ```yaml
	/// name: building
	/// fields:
	///   - name: geometry
	///     type: geometry
	///     allowed: [Polygon, MultiPolygon]
	///   - name: height
	///     type: number
	///     required: false
	/// ```
	pub fn from_yaml(text: &str) -> Result<Self> {
		let definition: RecordDefinition = serde_yaml_ng::from_str(text).context("parsing record definition")?;

		let mut fields = Vec::with_capacity(definition.fields.len());
		for field in definition.fields {
			let mut spec = FieldSpec::new(field.name, field.field_type).with_required(field.required);
			if let Some(allowed) = field.allowed {
				spec = spec.with_constraint(allowed)?;
			}
			fields.push(spec);
		}

		Ok(Self::new(definition.name, fields)?)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn fields(&self) -> &[FieldSpec] {
		&self.fields
	}

	pub fn field(&self, name: &str) -> Option<&FieldSpec> {
		self.fields.iter().find(|field| field.name == name)
	}

	/// Validates one document and reports every failing field, in field order.
	pub fn validate(&self, document: &Value) -> Result<Record, ValidationErrors> {
		let Some(object) = document.as_object() else {
			let error = ValidationError::new(
				Location::root(),
				ErrorDetail::WrongType {
					expected: "an object",
					found: json_type(document),
				},
			);
			return Err(error.into());
		};

		let mut errors = ValidationErrors::new();
		let mut values = Vec::with_capacity(self.fields.len());
		for field in &self.fields {
			let loc = Location::root().child(field.name());
			match object.get(field.name()) {
				None | Some(Value::Null) => {
					if field.required {
						errors.push(ValidationError::new(loc, ErrorDetail::Missing));
					}
				}
				Some(raw) => match field.load(raw, &loc) {
					Ok(value) => values.push((field.name.clone(), value)),
					Err(error) => errors.push(error),
				},
			}
		}

		if !errors.is_empty() {
			debug!("{}: {} invalid fields", self.name, errors.len());
		}
		errors.into_result(Record { values })
	}

	/// Validates many documents in parallel. Results are in input order.
	pub fn validate_many_par(&self, documents: &[Value]) -> Vec<Result<Record, ValidationErrors>> {
		documents.par_iter().map(|document| self.validate(document)).collect()
	}

	/// An `object` schema with one property per field.
	pub fn json_schema(&self) -> Value {
		let properties = self
			.fields
			.iter()
			.map(|field| (field.name.clone(), field.json_schema()))
			.collect::<Map<_, _>>();
		let required = self
			.fields
			.iter()
			.filter(|field| field.required)
			.map(|field| Value::from(field.name.as_str()))
			.collect::<Vec<_>>();

		json!({
			"title": self.name,
			"type": "object",
			"required": required,
			"properties": properties
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{ErrorKind, GeometryKind, kind_json_schema};
	use pretty_assertions::assert_eq;

	const BUILDING: &str = "
name: building
fields:
  - name: geometry
    type: geometry
    allowed: [Polygon, MultiPolygon]
  - name: name
    type: string
    required: false
  - name: height
    type: number
    required: false
  - name: levels
    type: integer
    required: false
";

	fn square() -> Value {
		json!({"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]})
	}

	fn point() -> Value {
		json!({"type": "Point", "coordinates": [1, 2]})
	}

	#[test]
	fn from_yaml() {
		let schema = RecordSchema::from_yaml(BUILDING).unwrap();
		assert_eq!(schema.name(), "building");
		assert_eq!(schema.fields().len(), 4);

		let geometry = schema.field("geometry").unwrap();
		assert_eq!(geometry.field_type(), FieldType::Geometry);
		assert!(geometry.is_required());
		assert_eq!(
			geometry.constraint().map(KindConstraint::kinds),
			Some(vec![GeometryKind::MultiPolygon, GeometryKind::Polygon])
		);
		assert!(!schema.field("height").unwrap().is_required());
	}

	#[test]
	fn from_yaml_rejects_bad_definitions() {
		let err = RecordSchema::from_yaml("name: x\nfields:\n  - {name: g, type: geometry, allowed: []}\n").unwrap_err();
		assert!(format!("{err:#}").contains("allowed geometry types are empty"));

		let err = RecordSchema::from_yaml("name: x\nfields:\n  - {name: h, type: number, allowed: [Point]}\n").unwrap_err();
		assert_eq!(
			err.to_string(),
			"a geometry type constraint can only be applied to a geometry field; but field 'h' has type number"
		);

		let err = RecordSchema::from_yaml("name: x\nfields:\n  - {name: a, type: string}\n  - {name: a, type: number}\n")
			.unwrap_err();
		assert_eq!(err.to_string(), "field 'a' is defined more than once");

		assert!(RecordSchema::from_yaml("name: x\nfields:\n  - {name: a, type: date}\n").is_err());
	}

	#[test]
	fn constraint_only_attaches_to_geometry_fields() {
		let constraint = KindConstraint::new(["Point"]).unwrap();
		assert!(FieldSpec::new("g", FieldType::Geometry).with_constraint(constraint).is_ok());
		assert_eq!(
			FieldSpec::new("name", FieldType::String).with_constraint(constraint),
			Err(ConstraintError::NotGeometry {
				field: "name".to_string(),
				field_type: FieldType::String
			})
		);
	}

	#[test]
	fn validate_valid_document() {
		let schema = RecordSchema::from_yaml(BUILDING).unwrap();
		let document = json!({"geometry": square(), "name": "Town hall", "levels": 3, "extra": true});
		let record = schema.validate(&document).unwrap();

		assert_eq!(record.len(), 3);
		assert_eq!(record.geometry("geometry").map(Geometry::kind), Some(GeometryKind::Polygon));
		assert_eq!(record.get("levels"), Some(&FieldValue::Integer(3)));
		assert_eq!(record.get("height"), None);
		assert_eq!(
			record.iter().map(|(name, _)| name).collect::<Vec<_>>(),
			["geometry", "name", "levels"]
		);
		assert_eq!(
			record.to_json(),
			json!({"geometry": square(), "name": "Town hall", "levels": 3})
		);
	}

	#[test]
	fn validate_collects_every_error() {
		let schema = RecordSchema::from_yaml(BUILDING).unwrap();
		let document = json!({"geometry": point(), "name": 7, "height": "tall", "levels": 2.5});
		let errors = schema.validate(&document).unwrap_err();

		let summary = errors
			.iter()
			.map(|e| (e.loc.to_string(), e.kind()))
			.collect::<Vec<_>>();
		assert_eq!(
			summary,
			vec![
				("geometry".to_string(), ErrorKind::KindNotAllowed),
				("name".to_string(), ErrorKind::TypeError),
				("height".to_string(), ErrorKind::TypeError),
				("levels".to_string(), ErrorKind::TypeError),
			]
		);
		assert_eq!(
			errors.as_slice()[3].message(),
			"expected an integer; but found a number"
		);
	}

	#[test]
	fn five_invalid_geometry_fields_report_five_errors() {
		let fields = (0..5)
			.map(|i| {
				FieldSpec::new(format!("g{i}"), FieldType::Geometry)
					.with_constraint(KindConstraint::new(["Polygon"]).unwrap())
					.unwrap()
			})
			.collect();
		let schema = RecordSchema::new("many", fields).unwrap();

		let document = json!({
			"g0": point(),
			"g1": "not a map",
			"g2": {"type": "Triangle"},
			"g3": {"type": "Polygon"},
			"g4": point()
		});
		let errors = schema.validate(&document).unwrap_err();
		assert_eq!(errors.len(), 5);
		assert_eq!(
			errors.iter().map(ValidationError::kind).collect::<Vec<_>>(),
			[
				ErrorKind::KindNotAllowed,
				ErrorKind::TypeError,
				ErrorKind::ValueError,
				ErrorKind::ValueError,
				ErrorKind::KindNotAllowed,
			]
		);
		assert_eq!(
			errors.iter().map(|e| e.loc.to_string()).collect::<Vec<_>>(),
			["g0", "g1", "g2", "g3", "g4"]
		);
	}

	#[test]
	fn missing_and_null_fields() {
		let schema = RecordSchema::from_yaml(BUILDING).unwrap();

		let errors = schema.validate(&json!({"name": null})).unwrap_err();
		assert_eq!(errors.len(), 1);
		assert_eq!(errors.to_string(), "1 validation error\n  geometry: field required [missing]");

		let errors = schema.validate(&json!({"geometry": null})).unwrap_err();
		assert_eq!(errors.as_slice()[0].kind(), ErrorKind::Missing);
	}

	#[test]
	fn document_must_be_an_object() {
		let schema = RecordSchema::from_yaml(BUILDING).unwrap();
		let errors = schema.validate(&json!([1, 2])).unwrap_err();
		assert_eq!(
			errors.to_string(),
			"1 validation error\n  expected an object; but found an array [type_error]"
		);
	}

	#[test]
	fn validate_many_par_keeps_order() {
		let schema = RecordSchema::from_yaml(BUILDING).unwrap();
		let documents = (0..200)
			.map(|i| {
				if i % 3 == 0 {
					json!({"geometry": point(), "levels": i})
				} else {
					json!({"geometry": square(), "levels": i})
				}
			})
			.collect::<Vec<_>>();

		let results = schema.validate_many_par(&documents);
		assert_eq!(results.len(), 200);
		for (i, result) in results.iter().enumerate() {
			match result {
				Ok(record) => {
					assert_ne!(i % 3, 0);
					assert_eq!(record.get("levels"), Some(&FieldValue::Integer(i64::try_from(i).unwrap())));
				}
				Err(errors) => {
					assert_eq!(i % 3, 0);
					assert_eq!(errors.as_slice()[0].kind(), ErrorKind::KindNotAllowed);
				}
			}
		}
	}

	#[test]
	fn json_schema() {
		let schema = RecordSchema::from_yaml(BUILDING).unwrap();
		let json = schema.json_schema();

		assert_eq!(json["title"], "building");
		assert_eq!(json["type"], "object");
		assert_eq!(json["required"], json!(["geometry"]));
		assert_eq!(json["properties"]["height"], json!({"type": ["number", "null"]}));
		assert_eq!(json["properties"]["levels"], json!({"type": ["integer", "null"]}));
		assert_eq!(
			json["properties"]["geometry"]["oneOf"],
			json!([
				kind_json_schema(GeometryKind::MultiPolygon),
				kind_json_schema(GeometryKind::Polygon)
			])
		);

		let unconstrained = FieldSpec::new("g", FieldType::Geometry);
		assert_eq!(unconstrained.json_schema(), Geometry::json_schema());
	}

	#[test]
	fn optional_fields_accept_null_in_schema_and_validation() {
		let schema = RecordSchema::new(
			"site",
			vec![
				FieldSpec::new("area", FieldType::Geometry)
					.with_constraint(KindConstraint::single(GeometryKind::Polygon))
					.unwrap()
					.with_required(false),
				FieldSpec::new("label", FieldType::String).with_required(false),
				FieldSpec::new("count", FieldType::Integer),
			],
		)
		.unwrap();

		let json = schema.json_schema();
		assert_eq!(
			json["properties"]["area"],
			json!({"anyOf": [kind_json_schema(GeometryKind::Polygon), {"type": "null"}]})
		);
		assert_eq!(json["properties"]["label"], json!({"type": ["string", "null"]}));
		assert_eq!(json["properties"]["count"], json!({"type": "integer"}));

		let record = schema.validate(&json!({"area": null, "label": null, "count": 2})).unwrap();
		assert_eq!(record.len(), 1);

		let errors = schema.validate(&json!({"area": null, "count": null})).unwrap_err();
		assert_eq!(errors.len(), 1);
		assert_eq!(errors.as_slice()[0].to_string(), "count: field required [missing]");
	}
}
