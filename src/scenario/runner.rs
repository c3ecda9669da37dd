//! Scenario runner
//!
//! Executes one scenario at a time against a fresh context in an isolated
//! working directory. Skips are terminal but deliberate: a skipped
//! scenario is neither passed nor failed.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use tracing::info;

use crate::common::{Capabilities, Error, Result};
use crate::harness::assemble::NodeCompleter;
use crate::harness::context::ScenarioContext;

use super::config::Scenario;
use super::steps;

/// Terminal state of one scenario
#[derive(Debug)]
pub enum Outcome {
    Passed,
    Skipped(String),
    Failed(String),
}

/// Result of a scenario run
#[derive(Debug)]
pub struct ScenarioResult {
    pub name: String,
    pub outcome: Outcome,
    pub steps_run: usize,
    pub steps_total: usize,
}

/// Run a scenario from a YAML file
///
/// Loads the file, creates an isolated working directory and a fresh
/// context, and executes the steps in order. A skip or failure aborts the
/// remaining steps of this scenario only.
pub fn run_scenario(
    path: &Path,
    caps: Arc<Capabilities>,
    default_data_dir: &Path,
    completer: &dyn NodeCompleter,
    verbose: bool,
) -> Result<ScenarioResult> {
    let scenario = Scenario::load(path)?;
    let steps_total = scenario.steps.len();

    println!(
        "\n{} {}",
        "Scenario:".blue().bold(),
        scenario.name.white().bold()
    );
    if let Some(desc) = &scenario.description {
        println!("  {}", desc.dimmed());
    }

    // Workdir lives exactly as long as the scenario
    let workdir = tempfile::tempdir()?;
    let mut ctx = ScenarioContext::new(
        workdir.path().to_path_buf(),
        default_data_dir.to_path_buf(),
        caps,
    );

    if verbose {
        println!("  workdir: {}", ctx.workdir.display().to_string().dimmed());
    }

    for (i, step) in scenario.steps.iter().enumerate() {
        let step_num = i + 1;
        let handler = steps::resolve(step)?;

        match handler(&mut ctx, step, completer) {
            Ok(()) => {
                println!("  {} Step {}: {}", "✓".green(), step_num, step.name().dimmed());
            }
            Err(Error::Skip(reason)) => {
                println!("  {} Step {}: {}", "↷".yellow(), step_num, reason.yellow());
                info!(scenario = %scenario.name, %reason, "scenario skipped");
                return Ok(ScenarioResult {
                    name: scenario.name,
                    outcome: Outcome::Skipped(reason),
                    steps_run: step_num,
                    steps_total,
                });
            }
            Err(e) => {
                println!("  {} Step {}: {}", "✗".red(), step_num, e);
                return Ok(ScenarioResult {
                    name: scenario.name,
                    outcome: Outcome::Failed(e.to_string()),
                    steps_run: step_num,
                    steps_total,
                });
            }
        }
    }

    println!("  {} {}", "✓".green().bold(), "passed".green());
    Ok(ScenarioResult {
        name: scenario.name,
        outcome: Outcome::Passed,
        steps_run: steps_total,
        steps_total,
    })
}
