use super::input::read_json;
use anyhow::{Context, Result};
use geoschema_geometry::Geometry;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// GeoJSON geometry file, or "-" to read from stdin
	#[arg(required = true)]
	input: String,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	println!("{}", to_wkt(&arguments.input)?);
	Ok(())
}

fn to_wkt(input: &str) -> Result<String> {
	let geometry = Geometry::from_geojson(&read_json(input)?).with_context(|| format!("decoding '{input}'"))?;
	Ok(geometry.to_wkt())
}
