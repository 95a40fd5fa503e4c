//! Scope filters: which checks apply to an edited file.

use std::collections::HashSet;
use std::path::Path;

use crate::config::ToolCommand;
use crate::runner::CommandRunner;

/// File kinds with a dedicated pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// TypeScript / JavaScript sources and JSX.
    Script,
    Solidity,
    Cairo,
    /// Only checked for well-formedness.
    Json,
    /// Anything else; never checked.
    Other,
}

impl FileKind {
    /// Classify a path by its (case-insensitive) extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "ts" | "tsx" | "js" | "jsx" => FileKind::Script,
            "sol" => FileKind::Solidity,
            "cairo" => FileKind::Cairo,
            "json" => FileKind::Json,
            _ => FileKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Script => "script",
            FileKind::Solidity => "solidity",
            FileKind::Cairo => "cairo",
            FileKind::Json => "json",
            FileKind::Other => "other",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether `path` lies under a generated or vendored location, judged by
/// plain substring match against `patterns`.
pub fn is_generated_path<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    patterns.iter().any(|p| path.contains(p.as_ref()))
}

/// Basename of a path as given, falling back to the whole string.
pub fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Basenames of files that differ from the last commit.
///
/// Returns `None` when the lookup fails or nothing is modified, meaning
/// type errors should not be narrowed.
pub fn modified_basenames(
    runner: &dyn CommandRunner,
    command: &ToolCommand,
) -> Option<HashSet<String>> {
    let result = runner.run(&command.render(None), command.timeout());
    if !result.succeeded {
        tracing::debug!(output = %result.output.trim(), "modified-file lookup failed");
        return None;
    }

    let names: HashSet<String> = result
        .output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(display_name)
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}
