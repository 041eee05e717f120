mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
	arg_required_else_help = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Print the JSON Schema of a geometry field or of a record definition
	Schema(tools::schema::Subcommand),

	/// Validate a GeoJSON geometry or a record document
	Check(tools::check::Subcommand),

	/// Print a GeoJSON geometry as well-known text
	Wkt(tools::wkt::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Schema(arguments) => tools::schema::run(arguments),
		Commands::Check(arguments) => tools::check::run(arguments),
		Commands::Wkt(arguments) => tools::wkt::run(arguments),
	}
}

#[cfg(test)]
mod tests {
	use crate::{Cli, run};
	use anyhow::Result;
	use clap::Parser;

	pub fn run_command(arg_vec: Vec<&str>) -> Result<String> {
		let cli = Cli::try_parse_from(arg_vec)?;
		let msg = format!("{cli:?}");
		run(cli)?;
		Ok(msg)
	}

	#[test]
	fn help() {
		let err = run_command(vec!["geoschema"]).unwrap_err().to_string();
		assert!(err.starts_with("Validated GeoJSON geometry values with kind constraints and JSON Schema generation."));
		assert!(err.contains("\nUsage: geoschema [OPTIONS] <COMMAND>"));
	}

	#[test]
	fn version() {
		let err = run_command(vec!["geoschema", "-V"]).unwrap_err().to_string();
		assert!(err.starts_with("geoschema "));
	}

	#[test]
	fn check_subcommand() {
		let output = run_command(vec!["geoschema", "check"]).unwrap_err().to_string();
		assert!(output.starts_with("Validate a GeoJSON geometry or a record document"));
	}

	#[test]
	fn wkt_subcommand() {
		let output = run_command(vec!["geoschema", "wkt"]).unwrap_err().to_string();
		assert!(output.starts_with("Print a GeoJSON geometry as well-known text"));
	}
}
