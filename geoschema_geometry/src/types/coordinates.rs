use crate::geojson::json_type;
use anyhow::{Result, anyhow, bail};
use serde_json::Value;
use std::{
	fmt::Debug,
	hash::{Hash, Hasher},
};

/// Largest magnitude below which every integral `f64` is exactly an `i64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single GeoJSON position: `x`, `y` and an optional `z`.
///
/// Values are expected to be finite; the decoder only produces finite values and
/// [`Coordinates::verify`] rejects anything else.
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinates {
	x: f64,
	y: f64,
	z: Option<f64>,
}

impl Coordinates {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y, z: None }
	}

	#[must_use]
	pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z: Some(z) }
	}

	#[must_use]
	pub fn x(&self) -> f64 {
		self.x
	}

	#[must_use]
	pub fn y(&self) -> f64 {
		self.y
	}

	#[must_use]
	pub fn z(&self) -> Option<f64> {
		self.z
	}

	#[must_use]
	pub fn has_z(&self) -> bool {
		self.z.is_some()
	}

	/// Values of this position in GeoJSON order.
	pub fn values(&self) -> impl Iterator<Item = f64> {
		[self.x, self.y].into_iter().chain(self.z)
	}

	pub fn verify(&self) -> Result<()> {
		if self.values().all(f64::is_finite) {
			Ok(())
		} else {
			bail!("position values must be finite numbers")
		}
	}

	#[must_use]
	pub fn to_json(&self) -> Value {
		Value::Array(self.values().map(number_to_json).collect())
	}

	/// Parses a position array `[x, y]` or `[x, y, z]`.
	pub fn from_json(json: &Value) -> Result<Self> {
		let list = json
			.as_array()
			.ok_or_else(|| anyhow!("expected a position array, found {}", json_type(json)))?;
		let numbers = list
			.iter()
			.map(|v| v.as_f64().ok_or_else(|| anyhow!("expected a number, found {}", json_type(v))))
			.collect::<Result<Vec<f64>>>()?;
		match numbers.as_slice() {
			[x, y] => Ok(Self::new(*x, *y)),
			[x, y, z] => Ok(Self::new_3d(*x, *y, *z)),
			_ => bail!("a position must have two or three values, found {}", numbers.len()),
		}
	}
}

/// Encodes a number, using an integer when that is exact so `1` stays `1` rather than `1.0`.
fn number_to_json(value: f64) -> Value {
	let negative_zero = value == 0.0 && value.is_sign_negative();
	if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER && !negative_zero {
		Value::from(value as i64)
	} else {
		Value::from(value)
	}
}

/// `0.0` and `-0.0` compare equal, so they must hash alike.
fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
	let bits = if value == 0.0 { 0u64 } else { value.to_bits() };
	bits.hash(state);
}

impl Eq for Coordinates {}

impl Hash for Coordinates {
	fn hash<H: Hasher>(&self, state: &mut H) {
		hash_f64(self.x, state);
		hash_f64(self.y, state);
		self.z.is_some().hash(state);
		if let Some(z) = self.z {
			hash_f64(z, state);
		}
	}
}

impl<'a, T> From<&'a [T; 2]> for Coordinates
where
	T: Copy + Into<f64>,
{
	fn from(value: &'a [T; 2]) -> Self {
		Coordinates::new(value[0].into(), value[1].into())
	}
}

impl From<[f64; 2]> for Coordinates {
	fn from(value: [f64; 2]) -> Self {
		Coordinates::new(value[0], value[1])
	}
}

impl From<[f64; 3]> for Coordinates {
	fn from(value: [f64; 3]) -> Self {
		Coordinates::new_3d(value[0], value[1], value[2])
	}
}

impl From<(f64, f64)> for Coordinates {
	fn from(value: (f64, f64)) -> Self {
		Coordinates::new(value.0, value.1)
	}
}

impl From<&(f64, f64)> for Coordinates {
	fn from(value: &(f64, f64)) -> Self {
		Coordinates::new(value.0, value.1)
	}
}

impl From<geo::Coord> for Coordinates {
	fn from(value: geo::Coord) -> Self {
		Coordinates::new(value.x, value.y)
	}
}

impl From<&Coordinates> for geo::Coord {
	fn from(value: &Coordinates) -> Self {
		geo::Coord { x: value.x, y: value.y }
	}
}

impl Debug for Coordinates {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.z {
			Some(z) => [self.x, self.y, z].fmt(f),
			None => [self.x, self.y].fmt(f),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use std::collections::hash_map::DefaultHasher;

	fn hash_of(c: &Coordinates) -> u64 {
		let mut hasher = DefaultHasher::new();
		c.hash(&mut hasher);
		hasher.finish()
	}

	#[test]
	fn new_and_accessors() {
		let c = Coordinates::new(13.404954, 52.520008);
		assert_eq!(c.x(), 13.404954);
		assert_eq!(c.y(), 52.520008);
		assert_eq!(c.z(), None);

		let c = Coordinates::new_3d(1.0, 2.0, 3.0);
		assert_eq!(c.z(), Some(3.0));
		assert!(c.has_z());
	}

	#[test]
	fn debug_formats_like_array() {
		assert_eq!(format!("{:?}", Coordinates::new(1.0, 2.0)), "[1.0, 2.0]");
		assert_eq!(format!("{:?}", Coordinates::new_3d(1.0, 2.0, 3.5)), "[1.0, 2.0, 3.5]");
	}

	#[rstest]
	#[case(json!([1, 2]), Coordinates::new(1.0, 2.0))]
	#[case(json!([1.5, -2.25]), Coordinates::new(1.5, -2.25))]
	#[case(json!([1, 2, 3]), Coordinates::new_3d(1.0, 2.0, 3.0))]
	fn from_json(#[case] json: Value, #[case] expected: Coordinates) {
		assert_eq!(Coordinates::from_json(&json).unwrap(), expected);
	}

	#[rstest]
	#[case(json!([1]), "a position must have two or three values, found 1")]
	#[case(json!([1, 2, 3, 4]), "a position must have two or three values, found 4")]
	#[case(json!([1, "2"]), "expected a number, found a string")]
	#[case(json!({"x": 1}), "expected a position array, found an object")]
	#[case(json!(7), "expected a position array, found a number")]
	fn from_json_errors(#[case] json: Value, #[case] message: &str) {
		assert_eq!(Coordinates::from_json(&json).unwrap_err().to_string(), message);
	}

	#[test]
	fn to_json_keeps_integers_and_fractions() {
		assert_eq!(Coordinates::new(1.0, 2.5).to_json(), json!([1, 2.5]));
		assert_eq!(Coordinates::new_3d(-3.0, 0.0, 1e300).to_json(), json!([-3, 0, 1e300]));
	}

	#[test]
	fn negative_zero_keeps_its_sign() {
		let json = Coordinates::new(-0.0, 0.0).to_json();
		let back = Coordinates::from_json(&json).unwrap();
		assert!(back.x().is_sign_negative());
		assert!(!back.y().is_sign_negative());
	}

	#[test]
	fn hash_matches_equality() {
		assert_eq!(Coordinates::new(-0.0, 1.0), Coordinates::new(0.0, 1.0));
		assert_eq!(
			hash_of(&Coordinates::new(-0.0, 1.0)),
			hash_of(&Coordinates::new(0.0, 1.0))
		);
		assert_ne!(Coordinates::new(1.0, 2.0), Coordinates::new_3d(1.0, 2.0, 0.0));
	}

	#[test]
	fn verify_rejects_non_finite() {
		assert!(Coordinates::new(1.0, 2.0).verify().is_ok());
		assert!(Coordinates::new(f64::NAN, 2.0).verify().is_err());
		assert!(Coordinates::new_3d(1.0, 2.0, f64::INFINITY).verify().is_err());
	}

	#[test]
	fn conversions() {
		assert_eq!(Coordinates::from(&[7, 8]), Coordinates::new(7.0, 8.0));
		assert_eq!(Coordinates::from((3.0, 4.0)), Coordinates::new(3.0, 4.0));
		assert_eq!(Coordinates::from([1.0, 2.0, 3.0]), Coordinates::new_3d(1.0, 2.0, 3.0));

		let gc = geo::Coord { x: 11.0, y: 22.0 };
		assert_eq!(Coordinates::from(gc), Coordinates::new(11.0, 22.0));
		assert_eq!(geo::Coord::from(&Coordinates::new(11.0, 22.0)), gc);
	}
}
