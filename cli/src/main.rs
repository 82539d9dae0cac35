//! graph-walk: command-line driver for graph-walk-core.
//!
//! Builds a graph from `--edge` flags (or the built-in demo graph), runs one
//! traversal, path search, ancestry or social query, and prints the result
//! as text or JSON. `bench` times the engine on generated topologies.

use std::process::ExitCode;

use clap::Parser;

mod args;
mod bench;
mod commands;
mod logging;
mod output;

use args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("graph-walk: failed to initialize logging: {e}");
    }

    match commands::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
