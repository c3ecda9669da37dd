//! Scenario harness CLI for a geodata import tool

use clap::Parser;
use geoimport_harness::{cli, commands, common};

use commands::Commands;

#[derive(Parser)]
#[command(name = "geoharness", about = "Scenario harness for a geodata import tool")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    common::logging::init();

    let cli = Cli::parse();

    match cli::dispatch(cli.command) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
