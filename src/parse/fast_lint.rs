//! Parser for the lightweight per-edit linter (oxlint).

use super::{truncate, Category, CheckResult, Finding};

/// Diagnostic lines start with this marker once indentation is stripped.
const DIAGNOSTIC_MARKER: char = '!';
const MAX_DIAGNOSTICS: usize = 3;
const DIAGNOSTIC_LEN: usize = 100;

/// Take the first few diagnostics as individual blocking findings.
pub fn parse_fast_lint(result: &CheckResult, tool: &str) -> Vec<Finding> {
    result
        .output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(DIAGNOSTIC_MARKER))
        .take(MAX_DIAGNOSTICS)
        .map(|line| {
            Finding::error(
                Category::Lint,
                format!("{}: {}", tool, truncate(line, DIAGNOSTIC_LEN)),
            )
        })
        .collect()
}
