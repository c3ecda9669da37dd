//! Step dispatch registry
//!
//! Maps step names to handler functions. The table is resolved once at
//! first use and stays external to the core harness library, which keeps
//! the core callable directly from its own tests.

use std::sync::OnceLock;

use crate::common::{Error, Result};
use crate::harness::assemble::NodeCompleter;
use crate::harness::context::{ScenarioContext, Table};
use crate::harness::{invoke, params};

use super::config::Step;

/// A step handler mutating the scenario context
pub type StepFn = fn(&mut ScenarioContext, &Step, &dyn NodeCompleter) -> Result<()>;

static REGISTRY: OnceLock<Vec<(&'static str, StepFn)>> = OnceLock::new();

/// The step registry, built on first use
pub fn registry() -> &'static [(&'static str, StepFn)] {
    REGISTRY.get_or_init(|| {
        vec![
            ("import_data", import_data as StepFn),
            ("import_file", import_file),
            ("default_lua_tagtransform", default_lua_tagtransform),
            ("lua_style", lua_style),
            ("parameters", parameters),
            ("table", table),
            ("run", run),
        ]
    })
}

/// Look up the handler for a step
pub fn resolve(step: &Step) -> Result<StepFn> {
    registry()
        .iter()
        .find(|(name, _)| *name == step.name())
        .map(|(_, f)| *f)
        .ok_or_else(|| Error::contract(format!("no handler registered for step '{}'", step.name())))
}

fn import_data(ctx: &mut ScenarioContext, step: &Step, _: &dyn NodeCompleter) -> Result<()> {
    let Step::ImportData { records } = step else {
        return Err(Error::contract("import_data handler got a different step"));
    };
    for line in records {
        ctx.records.push(line.clone())?;
    }
    Ok(())
}

fn import_file(ctx: &mut ScenarioContext, step: &Step, _: &dyn NodeCompleter) -> Result<()> {
    let Step::ImportFile { path } = step else {
        return Err(Error::contract("import_file handler got a different step"));
    };
    ctx.import_file = Some(path.clone());
    Ok(())
}

fn default_lua_tagtransform(
    ctx: &mut ScenarioContext,
    _: &Step,
    _: &dyn NodeCompleter,
) -> Result<()> {
    params::default_lua_tagtransform(ctx)
}

fn lua_style(ctx: &mut ScenarioContext, step: &Step, _: &dyn NodeCompleter) -> Result<()> {
    let Step::LuaStyle { text } = step else {
        return Err(Error::contract("lua_style handler got a different step"));
    };
    params::inline_lua_style(ctx, text)
}

fn parameters(ctx: &mut ScenarioContext, step: &Step, _: &dyn NodeCompleter) -> Result<()> {
    let Step::Parameters { values } = step else {
        return Err(Error::contract("parameters handler got a different step"));
    };
    ctx.params.extend(values.iter().cloned());
    Ok(())
}

fn table(ctx: &mut ScenarioContext, step: &Step, _: &dyn NodeCompleter) -> Result<()> {
    let Step::Table { headings, rows } = step else {
        return Err(Error::contract("table handler got a different step"));
    };
    ctx.table = Some(Table {
        headings: headings.clone(),
        rows: rows.clone(),
    });
    Ok(())
}

fn run(ctx: &mut ScenarioContext, step: &Step, completer: &dyn NodeCompleter) -> Result<()> {
    let Step::Run { output } = step else {
        return Err(Error::contract("run handler got a different step"));
    };
    invoke::run_import_tool(ctx, output, completer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Capabilities;
    use crate::harness::assemble::NoopCompleter;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn ctx(workdir: &std::path::Path) -> ScenarioContext {
        ScenarioContext::new(
            workdir.to_path_buf(),
            PathBuf::from("/usr/share/osm2pgsql"),
            Arc::new(Capabilities::default()),
        )
    }

    #[test]
    fn every_step_name_resolves() {
        let steps = [
            Step::ImportData { records: vec![] },
            Step::ImportFile { path: PathBuf::from("x") },
            Step::DefaultLuaTagtransform,
            Step::LuaStyle { text: String::new() },
            Step::Parameters { values: vec![] },
            Step::Table { headings: vec![], rows: vec![] },
            Step::Run { output: "none".into() },
        ];
        for step in &steps {
            assert!(resolve(step).is_ok(), "unresolved step '{}'", step.name());
        }
    }

    #[test]
    fn import_data_accumulates_records() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx(dir.path());
        let step = Step::ImportData {
            records: vec!["n1 x1 y2".into(), "w1 Nn1".into()],
        };
        resolve(&step).unwrap()(&mut ctx, &step, &NoopCompleter).unwrap();
        assert!(!ctx.records.is_empty());
    }

    #[test]
    fn parameters_append_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx(dir.path());
        for step in [
            Step::Parameters { values: vec!["--slim".into()] },
            Step::Parameters { values: vec!["-x".into()] },
        ] {
            resolve(&step).unwrap()(&mut ctx, &step, &NoopCompleter).unwrap();
        }
        assert_eq!(ctx.params, ["--slim", "-x"]);
    }
}
