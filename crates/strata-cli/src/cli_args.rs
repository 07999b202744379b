use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "strata",
    version,
    about = "Minimum-platform-version API compatibility checker"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Scan a project's compiled units and UI documents against its
    /// declared minimum platform version
    Check {
        /// Project root (default: current directory)
        path: Option<PathBuf>,

        /// Declared minimum platform version (overrides strata.json)
        #[arg(long)]
        min: Option<u32>,

        /// Catalog database path (overrides strata.json)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}
