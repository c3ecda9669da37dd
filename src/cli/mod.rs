//! CLI command handling
//!
//! Dispatches CLI commands and formats the run summary.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;

use crate::commands::Commands;
use crate::common::{Capabilities, Result};
use crate::harness::assemble::NoopCompleter;
use crate::scenario::{self, Outcome};

/// Dispatch a CLI command
///
/// Returns the process exit code: nonzero when any scenario failed.
/// Skipped scenarios do not fail the run.
pub fn dispatch(command: Commands) -> Result<i32> {
    match command {
        Commands::Run {
            scenarios,
            caps,
            data_dir,
            verbose,
        } => run_all(scenarios, caps, data_dir, verbose),
    }
}

fn run_all(
    scenarios: Vec<PathBuf>,
    caps_file: Option<PathBuf>,
    data_dir: PathBuf,
    verbose: bool,
) -> Result<i32> {
    let caps = match &caps_file {
        Some(path) => Capabilities::load(path)?,
        None => Capabilities::from_env(),
    };
    let caps = Arc::new(caps);

    let mut passed = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for path in &scenarios {
        let result = scenario::run_scenario(
            path,
            Arc::clone(&caps),
            &data_dir,
            &NoopCompleter,
            verbose,
        )?;

        match result.outcome {
            Outcome::Passed => passed += 1,
            Outcome::Skipped(_) => skipped += 1,
            Outcome::Failed(_) => failed += 1,
        }
    }

    println!(
        "\n{} {} passed, {} skipped, {} failed",
        "Summary:".blue().bold(),
        passed.to_string().green(),
        skipped.to_string().yellow(),
        failed.to_string().red(),
    );

    Ok(if failed > 0 { 1 } else { 0 })
}
