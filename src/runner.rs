//! Process runner for external quality tools.
//!
//! Commands are opaque shell strings. The runner only reports whether the
//! command exited successfully and what it printed; it never returns an
//! error to the caller.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use crate::parse::CheckResult;

/// Output reported for a command that exceeded its time budget.
pub const TIMED_OUT: &str = "Timed out";

/// Something that can execute a shell command with a time budget.
///
/// Dispatchers only talk to this trait, so tests can substitute a fake that
/// records invocations and replays canned output.
pub trait CommandRunner {
    fn run(&self, command: &str, timeout: Duration) -> CheckResult;
}

/// Runs commands through the system shell inside the repository root.
pub struct ShellRunner {
    root: PathBuf,
}

impl ShellRunner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, timeout: Duration) -> CheckResult {
        let started = Instant::now();
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => return CheckResult::failed(e.to_string()),
        };

        let result = runtime.block_on(run_shell(&self.root, command, timeout));
        tracing::debug!(
            command,
            succeeded = result.succeeded,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "command finished"
        );
        result
    }
}

fn shell_command(command: &str) -> tokio::process::Command {
    if cfg!(target_os = "windows") {
        let mut c = tokio::process::Command::new("cmd");
        c.args(["/C", command]);
        c
    } else {
        let mut c = tokio::process::Command::new("sh");
        c.args(["-c", command]);
        c
    }
}

async fn run_shell(root: &Path, command: &str, timeout: Duration) -> CheckResult {
    let mut cmd = shell_command(command);
    cmd.current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => return CheckResult::failed(e.to_string()),
    };

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => {
            let mut text = String::from_utf8_lossy(&output.stdout).to_string();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            CheckResult {
                succeeded: output.status.success(),
                output: text,
            }
        }
        Ok(Err(e)) => CheckResult::failed(e.to_string()),
        Err(_) => {
            tracing::warn!(command, timeout_secs = timeout.as_secs(), "command timed out");
            CheckResult::failed(TIMED_OUT)
        }
    }
}

/// Quote a path for interpolation into a POSIX shell command.
pub fn shell_quote(s: &str) -> String {
    let safe = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+@%:,=".contains(c));
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}
