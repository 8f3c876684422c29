#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "vartype", about = "Typed value streams: registry listing, encoding, and inspection")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Types(cmd::types::Args),
	Hash(cmd::hash::Args),
	Encode(cmd::encode::Args),
	Inspect(cmd::inspect::Args),
}

fn main() {
	init_tracing();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> vartype::types::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Types(args) => cmd::types::run(args),
		Commands::Hash(args) => cmd::hash::run(args),
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Inspect(args) => cmd::inspect::run(args),
	}
}

fn init_tracing() {
	use tracing_subscriber::{EnvFilter, fmt, prelude::*};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(std::io::stderr).with_target(true))
		.with(filter)
		.init();
}
