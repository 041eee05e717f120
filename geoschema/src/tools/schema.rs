use super::input::{parse_constraint, read_record_schema};
use anyhow::Result;
use geoschema_geometry::{GeometryBinding, ValueBinding};
use serde_json::Value;

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {
	/// geometry types the field accepts, separated by commas, e.g. "Polygon,MultiPolygon"
	/// all types are accepted if omitted
	#[arg(long, short, value_delimiter = ',', verbatim_doc_comment)]
	allow: Vec<String>,

	/// YAML record definition; prints the schema of the whole record instead
	#[arg(long, short, conflicts_with = "allow")]
	record: Option<String>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(&build_schema(arguments)?)?);
	Ok(())
}

fn build_schema(arguments: &Subcommand) -> Result<Value> {
	if let Some(path) = &arguments.record {
		return Ok(read_record_schema(path)?.json_schema());
	}

	Ok(match parse_constraint(&arguments.allow)? {
		Some(constraint) => constraint.attach(GeometryBinding).json_schema(),
		None => GeometryBinding.json_schema(),
	})
}
