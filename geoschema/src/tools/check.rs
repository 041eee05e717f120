use super::input::{parse_constraint, read_json, read_record_schema};
use anyhow::{Result, bail};
use geoschema_geometry::{GeometryBinding, KindConstraint, Location, RecordSchema, ValueBinding};
use log::{debug, info};
use serde_json::Value;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// JSON document to check, or "-" to read from stdin
	/// without --record it must be a single GeoJSON geometry
	#[arg(required = true, verbatim_doc_comment)]
	input: String,

	/// geometry types the geometry may have, separated by commas
	#[arg(long, short, value_delimiter = ',')]
	allow: Vec<String>,

	/// YAML record definition; the input is then a record or an array of records
	#[arg(long, short, conflicts_with = "allow")]
	record: Option<String>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let document = read_json(&arguments.input)?;
	let lines = match &arguments.record {
		Some(path) => check_records(&read_record_schema(path)?, &document)?,
		None => vec![check_geometry(parse_constraint(&arguments.allow)?, &document)?],
	};
	for line in lines {
		println!("{line}");
	}
	Ok(())
}

fn check_geometry(constraint: Option<KindConstraint>, document: &Value) -> Result<String> {
	let loc = Location::root();
	let geometry = match constraint {
		Some(constraint) => constraint.attach(GeometryBinding).load(document, &loc)?,
		None => GeometryBinding.load(document, &loc)?,
	};
	debug!("decoded {geometry:?}");
	Ok(format!("ok: {geometry}"))
}

/// One line per valid record. Fails with every error of every invalid record.
fn check_records(schema: &RecordSchema, document: &Value) -> Result<Vec<String>> {
	let documents = match document {
		Value::Array(documents) => documents.as_slice(),
		document => std::slice::from_ref(document),
	};
	info!("checking {} {} record(s)", documents.len(), schema.name());

	let mut lines = Vec::new();
	let mut failures = Vec::new();
	for (index, result) in schema.validate_many_par(documents).into_iter().enumerate() {
		match result {
			Ok(record) => lines.push(format!("ok: {} {index} ({} fields)", schema.name(), record.len())),
			Err(errors) => failures.push(format!("{} {index}: {errors}", schema.name())),
		}
	}

	if !failures.is_empty() {
		bail!("{}", failures.join("\n"));
	}
	Ok(lines)
}
