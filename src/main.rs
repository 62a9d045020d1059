#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "blendq", about = "Structured queries over .blend files")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Info(cmd::info::Args),
	Dna(cmd::dna::Args),
	Get(cmd::get::Args),
	List(cmd::list::Args),
	Props(cmd::props::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> blendq::blend::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Dna(args) => cmd::dna::run(args),
		Commands::Get(args) => cmd::get::run(args),
		Commands::List(args) => cmd::list::run(args),
		Commands::Props(args) => cmd::props::run(args),
	}
}
