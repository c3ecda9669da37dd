//! Error types for the harness
//!
//! Skips are modeled as an error variant so that a single `?` aborts the
//! remaining steps of a scenario; the runner folds them back into a
//! non-failure outcome.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the harness
#[derive(Error, Debug)]
pub enum Error {
    // === Scenario control flow ===
    #[error("scenario skipped: {0}")]
    Skip(String),

    // === Import data errors ===
    #[error("malformed record id token in line '{line}'")]
    Parse { line: String },

    // === Child process errors ===
    #[error("import tool failed with error code {code}.\nOutput:\n{stdout}\n{stderr}\n")]
    ProcessFailure {
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("child {stream} was not valid UTF-8")]
    Utf8 { stream: &'static str },

    // === Harness defects ===
    #[error("harness contract violation: {0}")]
    Contract(String),

    // === Configuration errors ===
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to parse scenario file '{path}': {message}")]
    ScenarioParse { path: String, message: String },

    // === IO errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a skip condition with a human-readable reason
    pub fn skip(reason: impl Into<String>) -> Self {
        Self::Skip(reason.into())
    }

    /// Create a contract violation for a defect in the harness itself
    pub fn contract(message: impl Into<String>) -> Self {
        Self::Contract(message.into())
    }

    /// True if this error is a deliberate skip rather than a failure
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip(_))
    }
}
