//! Invocation building and child-process execution
//!
//! The argument vector is kept as typed tokens until spawn time so that
//! ordering and flag-presence rules stay independently testable. Flow per
//! invocation: build, skip check, spawn, wait, decode, assert.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::str::FromStr;

use tracing::debug;

use crate::common::{Error, Result};
use crate::harness::assemble::{self, NodeCompleter};
use crate::harness::context::ScenarioContext;

/// Default stylesheet used for pgsql output when no `-S` was given
pub const DEFAULT_STYLE_FILE: &str = "default.style";

/// Argument vectors containing this substring require tablespace support
const TABLESPACE_MARKER: &str = "tablespacetest";

/// Output backends of the import tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Flex,
    Pgsql,
    Gazetteer,
    None,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flex => "flex",
            Self::Pgsql => "pgsql",
            Self::Gazetteer => "gazetteer",
            Self::None => "none",
        }
    }
}

impl FromStr for OutputMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "flex" => Ok(Self::Flex),
            "pgsql" => Ok(Self::Pgsql),
            "gazetteer" => Ok(Self::Gazetteer),
            "none" => Ok(Self::None),
            other => Err(Error::contract(format!(
                "unknown output mode '{other}' (expected flex, pgsql, gazetteer or none)"
            ))),
        }
    }
}

/// One typed element of the command line
#[derive(Debug, Clone)]
enum ArgToken {
    /// The tool binary, possibly a bare name resolved at spawn time
    Program(PathBuf),
    /// A flag with its value, kept together until flattening
    Pair(String, String),
    /// A single free-standing token (accumulated parameter or table cell)
    Lone(String),
    /// The import file, always the last argument
    Input(PathBuf),
}

/// A fully built command invocation, ready to spawn
#[derive(Debug)]
pub struct Invocation {
    tokens: Vec<ArgToken>,
}

impl Invocation {
    /// Build the argument vector for one run of the import tool
    ///
    /// Order: binary, `-d <database>`, `-O <mode>`, accumulated parameters
    /// in append order, table cells (headings first), then the import file.
    /// The tablespace skip rule is evaluated on the assembled vector before
    /// the input file is produced, so a skipped scenario writes nothing.
    pub fn build(
        ctx: &mut ScenarioContext,
        output: &str,
        completer: &dyn NodeCompleter,
    ) -> Result<Self> {
        let mode = OutputMode::from_str(output)?;

        let mut tokens = vec![
            ArgToken::Program(ctx.caps.binary.clone()),
            ArgToken::Pair("-d".to_string(), ctx.caps.test_db.clone()),
            ArgToken::Pair("-O".to_string(), mode.as_str().to_string()),
        ];

        tokens.extend(ctx.params.iter().cloned().map(ArgToken::Lone));

        if let Some(table) = &ctx.table {
            tokens.extend(table.cells().map(|cell| ArgToken::Lone(cell.to_string())));
        }

        let mut inv = Self { tokens };

        if inv.requires_tablespace() && !ctx.caps.have_tablespace {
            return Err(Error::skip(format!(
                "tablespace {TABLESPACE_MARKER} not available"
            )));
        }

        if mode == OutputMode::Pgsql && !inv.contains_token("-S") {
            inv.tokens.push(ArgToken::Pair(
                "-S".to_string(),
                ctx.default_data_dir.join(DEFAULT_STYLE_FILE).display().to_string(),
            ));
        }

        inv.tokens.push(ArgToken::Input(assemble::import_file(ctx, completer)?));

        Ok(inv)
    }

    /// The flattened argument vector, binary first, input file last
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::new();
        for token in &self.tokens {
            match token {
                ArgToken::Program(p) => argv.push(p.display().to_string()),
                ArgToken::Pair(name, value) => {
                    argv.push(name.clone());
                    argv.push(value.clone());
                }
                ArgToken::Lone(value) => argv.push(value.clone()),
                ArgToken::Input(p) => argv.push(p.display().to_string()),
            }
        }
        argv
    }

    /// True if any flattened argument equals `token` exactly
    pub fn contains_token(&self, token: &str) -> bool {
        self.argv().iter().any(|arg| arg == token)
    }

    fn requires_tablespace(&self) -> bool {
        self.argv().iter().any(|arg| arg.contains(TABLESPACE_MARKER))
    }

    fn program(&self) -> Result<PathBuf> {
        match &self.tokens[0] {
            ArgToken::Program(p) => crate::common::caps::resolve_binary(p),
            _ => Err(Error::contract("invocation does not start with the binary")),
        }
    }

    /// Spawn the tool, wait for it, decode its output and assert success
    ///
    /// `Command::output` drains stdout and stderr concurrently while
    /// waiting, so full pipe buffers cannot deadlock the child. No timeout
    /// is enforced; a hung child hangs the scenario.
    pub fn run(&self) -> Result<RunResult> {
        let program = self.program()?;
        let args: Vec<String> = self.argv().into_iter().skip(1).collect();

        debug!(program = %program.display(), ?args, "spawning import tool");

        let output = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        let stdout = decode_stream(output.stdout, "stdout")?;
        let stderr = decode_stream(output.stderr, "stderr")?;

        // None means the child died from a signal
        let code = output.status.code().unwrap_or(-1);
        if code != 0 {
            return Err(Error::ProcessFailure { code, stdout, stderr });
        }

        Ok(RunResult { code, stdout, stderr })
    }
}

/// Exit code and fully decoded output of one tool run
#[derive(Debug)]
pub struct RunResult {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Decode a captured stream as UTF-8 and unescape literal `\n` sequences
fn decode_stream(bytes: Vec<u8>, stream: &'static str) -> Result<String> {
    let text = String::from_utf8(bytes).map_err(|_| Error::Utf8 { stream })?;
    Ok(text.replace("\\n", "\n"))
}

/// Build and run in one step
pub fn run_import_tool(
    ctx: &mut ScenarioContext,
    output: &str,
    completer: &dyn NodeCompleter,
) -> Result<RunResult> {
    Invocation::build(ctx, output, completer)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Capabilities;
    use crate::harness::assemble::NoopCompleter;
    use crate::harness::context::Table;
    use std::sync::Arc;

    fn ctx(caps: Capabilities) -> (tempfile::TempDir, ScenarioContext) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ScenarioContext::new(
            dir.path().to_path_buf(),
            PathBuf::from("/usr/share/osm2pgsql"),
            Arc::new(caps),
        );
        (dir, ctx)
    }

    #[test]
    fn argument_order_is_fixed() {
        let (_dir, mut ctx) = ctx(Capabilities::default());
        ctx.params.extend(["--slim".to_string(), "-x".to_string()]);
        ctx.records.push("n1 x0 y0").unwrap();

        let inv = Invocation::build(&mut ctx, "flex", &NoopCompleter).unwrap();
        let argv = inv.argv();
        assert_eq!(argv[0], "osm2pgsql");
        assert_eq!(argv[1..5], ["-d", "osm2pgsql-test", "-O", "flex"]);
        assert_eq!(argv[5..7], ["--slim", "-x"]);
        assert!(argv.last().unwrap().ends_with("inline_import_data.opl"));
    }

    #[test]
    fn table_cells_follow_params_headings_first() {
        let (_dir, mut ctx) = ctx(Capabilities::default());
        ctx.params.push("--slim".to_string());
        ctx.table = Some(Table {
            headings: vec!["--number-processes".into(), "1".into()],
            rows: vec![vec!["--drop".into(), "".into()]],
        });

        let inv = Invocation::build(&mut ctx, "none", &NoopCompleter).unwrap();
        let argv = inv.argv();
        assert_eq!(
            argv[5..9],
            ["--slim", "--number-processes", "1", "--drop"]
        );
    }

    #[test]
    fn pgsql_appends_default_style_exactly_once() {
        let (_dir, mut ctx) = ctx(Capabilities::default());

        let inv = Invocation::build(&mut ctx, "pgsql", &NoopCompleter).unwrap();
        let argv = inv.argv();
        let style_flags = argv.iter().filter(|a| *a == "-S").count();
        assert_eq!(style_flags, 1);
        let pos = argv.iter().position(|a| a == "-S").unwrap();
        assert_eq!(argv[pos + 1], "/usr/share/osm2pgsql/default.style");
        // input file still comes last
        assert!(argv.last().unwrap().ends_with("inline_import_data.opl"));
    }

    #[test]
    fn existing_style_flag_suppresses_default() {
        let (_dir, mut ctx) = ctx(Capabilities::default());
        ctx.params.extend(["-S".to_string(), "mine.style".to_string()]);

        let inv = Invocation::build(&mut ctx, "pgsql", &NoopCompleter).unwrap();
        let argv = inv.argv();
        assert_eq!(argv.iter().filter(|a| *a == "-S").count(), 1);
        assert!(!argv.contains(&"/usr/share/osm2pgsql/default.style".to_string()));
    }

    #[test]
    fn non_pgsql_modes_get_no_default_style() {
        for mode in ["flex", "gazetteer", "none"] {
            let (_dir, mut ctx) = ctx(Capabilities::default());
            let inv = Invocation::build(&mut ctx, mode, &NoopCompleter).unwrap();
            assert!(!inv.contains_token("-S"));
        }
    }

    #[test]
    fn bogus_output_mode_is_a_contract_violation() {
        let (_dir, mut ctx) = ctx(Capabilities::default());
        let err = Invocation::build(&mut ctx, "bogus", &NoopCompleter).unwrap_err();
        assert!(matches!(err, Error::Contract(_)));
    }

    #[test]
    fn tablespace_marker_without_capability_skips() {
        let caps = Capabilities {
            have_tablespace: false,
            ..Capabilities::default()
        };
        let (dir, mut ctx) = ctx(caps);
        ctx.params.extend([
            "--tablespace-main-data".to_string(),
            "tablespacetest".to_string(),
        ]);

        let err = Invocation::build(&mut ctx, "flex", &NoopCompleter).unwrap_err();
        assert!(err.is_skip());
        // skip happens before assembly, nothing was written
        assert!(!dir.path().join("inline_import_data.opl").exists());
    }

    #[test]
    fn tablespace_marker_with_capability_builds() {
        let (_dir, mut ctx) = ctx(Capabilities::default());
        ctx.params.extend([
            "--tablespace-main-data".to_string(),
            "tablespacetest".to_string(),
        ]);

        assert!(Invocation::build(&mut ctx, "flex", &NoopCompleter).is_ok());
    }

    #[test]
    fn newline_escapes_are_normalized() {
        let text = decode_stream(b"one\\ntwo".to_vec(), "stdout").unwrap();
        assert_eq!(text, "one\ntwo");
    }

    #[test]
    fn invalid_utf8_names_the_stream() {
        let err = decode_stream(vec![0xff, 0xfe], "stderr").unwrap_err();
        assert!(matches!(err, Error::Utf8 { stream: "stderr" }));
    }
}
