//! Import data assembly
//!
//! Serializes the accumulated records into the canonical input file for
//! the import tool, or passes through an explicit override path.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::common::Result;
use crate::harness::context::ScenarioContext;
use crate::harness::record::RecordKind;

/// Name of the generated data file inside the scenario workdir
pub const IMPORT_DATA_FILE: &str = "inline_import_data.opl";

/// Geometry-completion collaborator
///
/// Materializes node stubs for nodes that ways or relations reference but
/// the scenario never defined, by extending the node group in place. The
/// real implementation lives with the scenario driver's geometry factory.
pub trait NodeCompleter {
    fn complete_node_list(&self, nodes: &mut Vec<String>) -> Result<()>;
}

/// Completer that leaves the node list untouched
#[derive(Debug, Default)]
pub struct NoopCompleter;

impl NodeCompleter for NoopCompleter {
    fn complete_node_list(&self, _nodes: &mut Vec<String>) -> Result<()> {
        Ok(())
    }
}

/// Produce the import file path for the current scenario
///
/// With an explicit override on the context the override is returned
/// unchanged. Otherwise the node list is completed, every group is sorted
/// ascending by numeric id (stable for ties), and the groups are written
/// in order n, w, r to a fixed file in the workdir, one record per line,
/// newline-terminated. The file is rewritten in full on every call.
pub fn import_file(
    ctx: &mut ScenarioContext,
    completer: &dyn NodeCompleter,
) -> Result<PathBuf> {
    if let Some(path) = &ctx.import_file {
        return Ok(path.clone());
    }

    completer.complete_node_list(ctx.records.group_mut(RecordKind::Node))?;
    ctx.records.sort_by_id()?;

    let path = ctx.workdir.join(IMPORT_DATA_FILE);
    let mut file = fs::File::create(&path)?;
    for kind in RecordKind::ALL {
        for line in ctx.records.group(kind) {
            file.write_all(line.as_bytes())?;
            file.write_all(b"\n")?;
        }
    }

    debug!(path = %path.display(), "assembled import data");
    Ok(path)
}
