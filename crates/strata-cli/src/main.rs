//! strata CLI — minimum-platform-version compatibility checking.
//!
//! This binary provides the `strata` command. The core check is a pure
//! function in strata-check; everything here is host wiring: configuration,
//! input collection, rendering, exit codes.

use clap::Parser;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let formatter: Box<dyn strata_output::ReportFormatter> = if cli.json {
        Box::new(strata_output::json::JsonFormatter)
    } else {
        Box::new(strata_output::human::HumanFormatter)
    };

    let exit_code = match cli.command {
        Commands::Check { path, min, catalog } => {
            commands::check::run(&*formatter, path, min, catalog)
        }
    };

    std::process::exit(exit_code);
}
