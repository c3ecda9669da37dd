//! Per-scenario mutable state
//!
//! A `ScenarioContext` is created fresh by the scenario driver for every
//! scenario and discarded at scenario end; nothing in it outlives the
//! scenario except the shared read-only capability table.

use std::path::PathBuf;
use std::sync::Arc;

use crate::common::Capabilities;
use crate::harness::record::RecordStore;

/// Extra CLI cells supplied by a scenario as a table
///
/// The headings row is emitted first, then each body row; empty cells are
/// dropped, the rest keep column order.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headings: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// All non-empty cells in emission order
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.headings
            .iter()
            .chain(self.rows.iter().flatten())
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
    }
}

/// Mutable, scenario-scoped harness state
#[derive(Debug)]
pub struct ScenarioContext {
    /// Accumulated CLI parameters, strictly append-order
    pub params: Vec<String>,
    /// Extra CLI cells from a scenario table, if any
    pub table: Option<Table>,
    /// Explicit import file; when set, assembly is bypassed entirely
    pub import_file: Option<PathBuf>,
    /// Isolated working directory owned by this scenario
    pub workdir: PathBuf,
    /// Directory holding the default stylesheets shipped with the tool
    pub default_data_dir: PathBuf,
    /// Process-wide capability configuration, read-only
    pub caps: Arc<Capabilities>,
    /// Accumulated import records
    pub records: RecordStore,
}

impl ScenarioContext {
    pub fn new(workdir: PathBuf, default_data_dir: PathBuf, caps: Arc<Capabilities>) -> Self {
        Self {
            params: Vec::new(),
            table: None,
            import_file: None,
            workdir,
            default_data_dir,
            caps,
            records: RecordStore::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_cells_skip_empty_and_keep_order() {
        let table = Table {
            headings: vec!["--number-processes".into(), "1".into()],
            rows: vec![
                vec!["--slim".into(), "".into()],
                vec!["".into(), "-x".into()],
            ],
        };
        let cells: Vec<&str> = table.cells().collect();
        assert_eq!(cells, ["--number-processes", "1", "--slim", "-x"]);
    }
}
