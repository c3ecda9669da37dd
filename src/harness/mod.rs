//! Core harness logic
//!
//! Everything here is a plain library with explicit calls; scenario-file
//! dispatch lives in the `scenario` module.

pub mod assemble;
pub mod context;
pub mod invoke;
pub mod params;
pub mod record;

pub use assemble::{NodeCompleter, NoopCompleter};
pub use context::{ScenarioContext, Table};
pub use invoke::{Invocation, OutputMode, RunResult};
