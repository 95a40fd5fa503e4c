//! Command-line interface for editgate.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::dispatch::{self, Dispatcher, Mode};
use crate::event::Event;
use crate::parse::{Severity, Verdict};
use crate::report;
use crate::runner::ShellRunner;
use crate::scope::{display_name, FileKind};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
/// Informative failure; the host agent is not blocked.
pub const EXIT_FAILED: i32 = 1;
/// Blocking failure; the agent must fix the reported findings first.
pub const EXIT_BLOCKED: i32 = 2;

/// Environment variable holding the log filter (e.g. `editgate=debug`).
pub const LOG_ENV: &str = "EDITGATE_LOG";

/// Edit-triggered quality gate for coding agents.
///
/// Reads one hook event as JSON on stdin, runs the quality tools that apply
/// to the edited file, and reports through the exit code: 0 when the agent
/// may proceed, 2 (with findings on stderr) when it must fix something.
#[derive(Parser)]
#[command(name = "editgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Colorize output
    #[arg(long, global = true)]
    pub color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fast per-edit checks; silent unless something blocks
    #[command(visible_alias = "post-edit-fast")]
    Fast(HookArgs),
    /// Full per-edit pipeline with running commentary
    #[command(visible_alias = "post-edit")]
    Full(HookArgs),
    /// Gate run when the agent declares the session complete
    #[command(visible_alias = "on-complete")]
    Complete(HookArgs),
}

/// Arguments shared by every hook.
#[derive(Args, Debug, Clone, Default)]
pub struct HookArgs {
    /// Repository root (default: nearest ancestor of the executable with a .git entry)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Path to config YAML file (default: editgate.yaml in the root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip in-place formatting steps
    #[arg(long)]
    pub no_format: bool,
}

/// Install the stderr log subscriber. Logging is off unless `EDITGATE_LOG`
/// is set, so hook output stays clean.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Resolve the repository root every command runs in.
///
/// Independent of the caller's working directory: an explicit root wins,
/// otherwise the executable's own location is searched upwards.
pub fn resolve_root(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(root) = explicit {
        return root
            .canonicalize()
            .with_context(|| format!("cannot access root {}", root.display()));
    }

    let exe = std::env::current_exe()
        .and_then(|p| p.canonicalize())
        .context("cannot locate the editgate executable")?;
    exe.ancestors()
        .skip(1)
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
        .with_context(|| format!("no repository found above {}; pass --root", exe.display()))
}

fn load(args: &HookArgs) -> anyhow::Result<(PathBuf, Config)> {
    let root = resolve_root(args.root.as_deref())?;
    let config = Config::load(&root, args.config.as_deref())?;
    tracing::debug!(root = %root.display(), "resolved repository root");
    Ok((root, config))
}

/// Load root and config for an edit, or `None` when the edit is out of scope.
///
/// Unsupported kinds short-circuit before anything is loaded. A vendored path
/// stays silent even when the config or root cannot be loaded.
fn load_for_edit(
    args: &HookArgs,
    file_path: &str,
    mode: Mode,
) -> anyhow::Result<Option<(PathBuf, Config)>> {
    let kind = FileKind::from_path(file_path);
    if !dispatch::handles(kind, mode) {
        tracing::debug!(file_path, %kind, "unsupported file kind, skipping");
        return Ok(None);
    }

    match load(args) {
        Ok(loaded) => Ok(Some(loaded)),
        Err(e) if Config::default().is_skipped(file_path) => {
            tracing::debug!(file_path, error = %e, "vendored path, ignoring load failure");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Report a fast per-edit verdict: silent unless blocking.
pub fn finish_fast<W: Write>(
    err: &mut W,
    file_path: &str,
    verdict: Option<&Verdict>,
) -> io::Result<i32> {
    match verdict {
        Some(v) if v.has_blocking() => {
            report::write_blocking(err, &report::edit_header(&display_name(file_path)), v)?;
            Ok(EXIT_BLOCKED)
        }
        _ => Ok(EXIT_SUCCESS),
    }
}

/// Report a full per-edit verdict: commentary whenever the pipeline ran.
pub fn finish_full<W: Write>(
    out: &mut W,
    file_path: &str,
    verdict: Option<&Verdict>,
) -> io::Result<i32> {
    let Some(v) = verdict else {
        return Ok(EXIT_SUCCESS);
    };
    report::write_commentary(out, &display_name(file_path), v)?;
    if v.count(Severity::Error) > 0 {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Report a session-completion verdict: silent unless blocking.
pub fn finish_complete<W: Write>(err: &mut W, verdict: &Verdict) -> io::Result<i32> {
    if verdict.has_blocking() {
        report::write_blocking(err, report::COMPLETION_HEADER, verdict)?;
        Ok(EXIT_BLOCKED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the fast per-edit hook.
pub fn run_fast(args: &HookArgs) -> anyhow::Result<i32> {
    let event = Event::from_reader(io::stdin().lock());
    let Some(file_path) = event.file_path.clone() else {
        return Ok(EXIT_SUCCESS);
    };

    let Some((root, config)) = load_for_edit(args, &file_path, Mode::Fast)? else {
        return Ok(EXIT_SUCCESS);
    };
    let runner = ShellRunner::new(&root);
    let verdict = Dispatcher::new(&root, &config, &runner)
        .formatting(!args.no_format)
        .fast(&event);

    Ok(finish_fast(&mut io::stderr().lock(), &file_path, verdict.as_ref())?)
}

/// Run the full per-edit hook.
pub fn run_full(args: &HookArgs) -> anyhow::Result<i32> {
    let event = Event::from_reader(io::stdin().lock());
    let Some(file_path) = event.file_path.clone() else {
        return Ok(EXIT_SUCCESS);
    };

    let Some((root, config)) = load_for_edit(args, &file_path, Mode::Full)? else {
        return Ok(EXIT_SUCCESS);
    };
    let runner = ShellRunner::new(&root);
    let verdict = Dispatcher::new(&root, &config, &runner)
        .formatting(!args.no_format)
        .full(&event);

    Ok(finish_full(&mut io::stdout().lock(), &file_path, verdict.as_ref())?)
}

/// Run the session-completion hook. Stdin is not consulted.
pub fn run_complete(args: &HookArgs) -> anyhow::Result<i32> {
    let (root, config) = load(args)?;
    let runner = ShellRunner::new(&root);
    let verdict = Dispatcher::new(&root, &config, &runner)
        .formatting(!args.no_format)
        .complete();

    Ok(finish_complete(&mut io::stderr().lock(), &verdict)?)
}
