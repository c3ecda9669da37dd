//! CLI command definitions

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run one or more scenario files against the import tool
    Run {
        /// Scenario YAML files, executed in order
        #[arg(required = true)]
        scenarios: Vec<PathBuf>,

        /// Capability configuration file (TOML); defaults to env overrides only
        #[arg(long)]
        caps: Option<PathBuf>,

        /// Directory holding the tool's default stylesheets
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Print workdir paths and extra detail per step
        #[arg(short, long)]
        verbose: bool,
    },
}
