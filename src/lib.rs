//! Scenario-driven black-box test harness for a geodata import CLI
//!
//! Synthesizes OPL-like input data from accumulated records, builds the
//! tool's command-line invocation, spawns it as a child process, and
//! verifies its exit status and output. Scenarios that need a capability
//! the tool was built without are skipped, not failed.

pub mod cli;
pub mod commands;
pub mod common;
pub mod harness;
pub mod scenario;

// Re-export commonly used types for tests
pub use common::{Capabilities, Error, Result};
pub use harness::{Invocation, OutputMode, RunResult, ScenarioContext};
