//! Declarative parameter-building step handlers
//!
//! Each handler appends zero or more flag tokens to the scenario's shared
//! parameter list. Appends are strictly ordered and never reordered or
//! removed by later steps.

use std::fs;

use crate::common::{Error, Result};
use crate::harness::context::ScenarioContext;

/// Name of the stylesheet written by the inline-style step
pub const INLINE_STYLE_FILE: &str = "inline_style.lua";

/// Default tag-transform script shipped in the default data directory
pub const DEFAULT_TAGTRANSFORM_FILE: &str = "style.lua";

/// Use the stock Lua tag-transform script
///
/// Skips the scenario when the tool was built without Lua support; the
/// parameter list is left untouched in that case.
pub fn default_lua_tagtransform(ctx: &mut ScenarioContext) -> Result<()> {
    if !ctx.caps.have_lua {
        return Err(Error::skip("Lua support not compiled in"));
    }

    let script = ctx.default_data_dir.join(DEFAULT_TAGTRANSFORM_FILE);
    ctx.params.push("--tag-transform-script".to_string());
    ctx.params.push(script.display().to_string());
    Ok(())
}

/// Use a scenario-supplied Lua style, written verbatim into the workdir
pub fn inline_lua_style(ctx: &mut ScenarioContext, text: &str) -> Result<()> {
    if !ctx.caps.have_lua {
        return Err(Error::skip("Lua support not compiled in"));
    }

    let path = ctx.workdir.join(INLINE_STYLE_FILE);
    fs::write(&path, text)?;
    ctx.params.push("-S".to_string());
    ctx.params.push(path.display().to_string());
    Ok(())
}
