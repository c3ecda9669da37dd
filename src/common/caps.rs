//! Capability configuration for the tool under test
//!
//! Loaded once per test run and treated as immutable afterwards. The
//! flags mirror optional compiled-in features of the import tool: a
//! scenario that needs a feature the binary was built without is skipped,
//! not failed.

use serde::Deserialize;
use std::path::PathBuf;

use super::{Error, Result};

/// Immutable per-run capability configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Capabilities {
    /// Whether the tool was built with Lua scripting support
    #[serde(default = "default_true")]
    pub have_lua: bool,

    /// Whether the test database has the test tablespace set up
    #[serde(default = "default_true")]
    pub have_tablespace: bool,

    /// Path to (or bare name of) the import tool binary
    #[serde(default = "default_binary")]
    pub binary: PathBuf,

    /// Target database for imports
    #[serde(default = "default_test_db")]
    pub test_db: String,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            have_lua: default_true(),
            have_tablespace: default_true(),
            binary: default_binary(),
            test_db: default_test_db(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_binary() -> PathBuf {
    PathBuf::from("osm2pgsql")
}

fn default_test_db() -> String {
    "osm2pgsql-test".to_string()
}

impl Capabilities {
    /// Load capabilities from a TOML file, then apply environment overrides
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "failed to read capability file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let caps: Self = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "invalid capability file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(caps.with_env_overrides())
    }

    /// Build capabilities from defaults plus environment overrides only
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `GEOHARNESS_*` environment variables on top of `self`
    fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env_flag("GEOHARNESS_HAVE_LUA") {
            self.have_lua = v;
        }
        if let Some(v) = env_flag("GEOHARNESS_HAVE_TABLESPACE") {
            self.have_tablespace = v;
        }
        if let Ok(v) = std::env::var("GEOHARNESS_BINARY") {
            self.binary = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("GEOHARNESS_TEST_DB") {
            self.test_db = v;
        }
        self
    }

    /// Resolve the tool binary to a spawnable path
    pub fn resolved_binary(&self) -> Result<PathBuf> {
        resolve_binary(&self.binary)
    }
}

/// Resolve a binary to a spawnable path
///
/// Bare names are looked up on `$PATH`. Resolution happens just before a
/// spawn so that skipped scenarios and unit tests never require the tool
/// to be installed.
pub fn resolve_binary(binary: &std::path::Path) -> Result<PathBuf> {
    if binary.components().count() > 1 {
        return Ok(binary.to_path_buf());
    }
    which::which(binary).map_err(|e| {
        Error::Config(format!(
            "import tool binary '{}' not found: {}",
            binary.display(),
            e
        ))
    })
}

fn env_flag(name: &str) -> Option<bool> {
    match std::env::var(name).ok()?.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
