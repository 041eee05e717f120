use anyhow::{Context, Result};
use geoschema_geometry::{KindConstraint, RecordSchema};
use log::debug;
use serde_json::Value;
use std::io::Read;

/// Reads a whole file, or stdin when `path` is `-`.
pub fn read_text(path: &str) -> Result<String> {
	if path == "-" {
		let mut text = String::new();
		std::io::stdin().read_to_string(&mut text).context("reading stdin")?;
		return Ok(text);
	}
	debug!("reading {path}");
	std::fs::read_to_string(path).with_context(|| format!("reading '{path}'"))
}

pub fn read_json(path: &str) -> Result<Value> {
	serde_json::from_str(&read_text(path)?).with_context(|| format!("parsing JSON from '{path}'"))
}

pub fn read_record_schema(path: &str) -> Result<RecordSchema> {
	RecordSchema::from_yaml(&read_text(path)?).with_context(|| format!("loading record definition '{path}'"))
}

/// `None` when no kinds were given on the command line.
pub fn parse_constraint(kinds: &[String]) -> Result<Option<KindConstraint>> {
	if kinds.is_empty() {
		return Ok(None);
	}
	let constraint = KindConstraint::new(kinds).context("parsing --allow")?;
	Ok(Some(constraint))
}
