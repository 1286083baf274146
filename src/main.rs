use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use log::LevelFilter;
use jarbox::FileJar;

#[derive(Debug, Parser)]
#[command(about = "Renames the classes, fields and methods of java jars")]
struct Cli {
	/// Be verbose.
	#[arg(short = 'v', long = "verbose")]
	verbose: bool,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Generates a mapping file for all classes of a jar
	Dump {
		jarfile: PathBuf,
		outfile: PathBuf,
	},
	/// Remaps a jar using a mapping file made for it
	Convert {
		source_jar: PathBuf,
		target_jar: PathBuf,
		mapfile: PathBuf,
	},
}

fn setup_logging(verbose: bool) -> Result<()> {
	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
		})
		.level(if verbose { LevelFilter::Debug } else { LevelFilter::Info })
		.chain(std::io::stderr())
		.apply()
		.context("failed to set up logging")
}

fn main() -> Result<()> {
	// wrong usage isn't an error, it just shows how to use it
	let (verbose, command) = match Cli::try_parse() {
		Ok(Cli { verbose, command: Some(command) }) => (verbose, command),
		Ok(Cli { command: None, .. }) => {
			Cli::command().print_help()?;
			return Ok(());
		},
		Err(e) => {
			e.print()?;
			return Ok(());
		},
	};

	setup_logging(verbose)?;

	match command {
		Command::Dump { jarfile, outfile } => {
			mappify::dump::dump(&FileJar { path: jarfile }, &outfile)?;
		},
		Command::Convert { source_jar, target_jar, mapfile } => {
			mappify::convert::convert(&FileJar { path: source_jar }, &target_jar, &mapfile)?;
		},
	}

	Ok(())
}
