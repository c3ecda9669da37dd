//! Scenario file configuration types
//!
//! Defines the data structures for deserializing YAML scenario files.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::common::{Error, Result};

/// A complete scenario loaded from a YAML file
#[derive(Deserialize, Debug)]
pub struct Scenario {
    /// Name of the scenario
    pub name: String,
    /// Optional description of what the scenario verifies
    pub description: Option<String>,
    /// The sequence of steps to execute
    pub steps: Vec<Step>,
}

/// A single scenario step
#[derive(Deserialize, Debug)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Accumulate import records (one OPL-like line each)
    ImportData {
        records: Vec<String>,
    },
    /// Use an explicit import file instead of synthesized data
    ImportFile {
        path: PathBuf,
    },
    /// Use the stock Lua tag-transform script
    DefaultLuaTagtransform,
    /// Use an inline Lua style, written verbatim into the workdir
    LuaStyle {
        text: String,
    },
    /// Append raw CLI parameters in the given order
    Parameters {
        values: Vec<String>,
    },
    /// Supply extra CLI cells as a table, headings row first
    Table {
        #[serde(default)]
        headings: Vec<String>,
        #[serde(default)]
        rows: Vec<Vec<String>>,
    },
    /// Run the import tool with the given output mode
    Run {
        output: String,
    },
}

impl Step {
    /// Registry name of this step
    pub fn name(&self) -> &'static str {
        match self {
            Self::ImportData { .. } => "import_data",
            Self::ImportFile { .. } => "import_file",
            Self::DefaultLuaTagtransform => "default_lua_tagtransform",
            Self::LuaStyle { .. } => "lua_style",
            Self::Parameters { .. } => "parameters",
            Self::Table { .. } => "table",
            Self::Run { .. } => "run",
        }
    }
}

impl Scenario {
    /// Load and parse a scenario file
    ///
    /// Relative `import_file` overrides are resolved against the scenario
    /// file's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ScenarioParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut scenario: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::ScenarioParse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let scenario_dir = path.parent().unwrap_or(Path::new("."));
        for step in &mut scenario.steps {
            if let Step::ImportFile { path } = step {
                if path.is_relative() {
                    *path = scenario_dir.join(path.as_path());
                }
            }
        }

        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_step_sequence() {
        let yaml = r#"
name: lua style import
description: inline style plus a run
steps:
  - step: import_data
    records: ["n1 x1 y2"]
  - step: lua_style
    text: |
      tables = {}
  - step: parameters
    values: ["--slim"]
  - step: run
    output: flex
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.name, "lua style import");
        assert_eq!(scenario.steps.len(), 4);
        assert_eq!(scenario.steps[0].name(), "import_data");
        assert_eq!(scenario.steps[3].name(), "run");
    }

    #[test]
    fn unknown_step_is_rejected() {
        let yaml = "name: x\nsteps:\n  - step: frobnicate\n";
        assert!(serde_yaml::from_str::<Scenario>(yaml).is_err());
    }
}
