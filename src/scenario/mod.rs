//! Scenario files and their driver
//!
//! Reads YAML scenario files and executes their steps against the core
//! harness through a static step registry.

pub mod config;
pub mod runner;
pub mod steps;

pub use config::{Scenario, Step};
pub use runner::{run_scenario, Outcome, ScenarioResult};
