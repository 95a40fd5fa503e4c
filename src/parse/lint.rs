//! Parsers for linter output.
//!
//! Two flavours exist:
//! - the summary parser reads the trailing "N errors" line of a quiet,
//!   project-wide lint run
//! - the autofix parser reads what is left after `--fix` on a single file,
//!   where every remaining mention of "error" counts

use lazy_static::lazy_static;
use regex::Regex;

use super::{Category, CheckResult, Finding};

lazy_static! {
    static ref ERROR_COUNT: Regex = Regex::new(r"(\d+)\s+errors?").unwrap();
}

/// Parse the summary of a project-wide lint run.
///
/// Emits one blocking `Lint: N error(s)` finding when the summary reports a
/// positive error count.
pub fn parse_lint_summary(result: &CheckResult) -> Vec<Finding> {
    let lower = result.output.to_lowercase();
    if !lower.contains("error") || lower.contains("0 errors") {
        return Vec::new();
    }

    let count = ERROR_COUNT
        .captures(&result.output)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .unwrap_or(0);

    if count == 0 {
        return Vec::new();
    }

    vec![Finding::error(
        Category::Lint,
        format!("Lint: {} error(s)", count),
    )]
}

/// Parse the leftovers of a single-file `--fix` run.
pub fn parse_lint_fix(result: &CheckResult) -> Vec<Finding> {
    let count = result.output.to_lowercase().matches("error").count();
    if count > 0 {
        vec![Finding::error(
            Category::Lint,
            format!("Lint: {} error(s) remain", count),
        )]
    } else {
        vec![Finding::info(Category::Lint, "Lint passed/fixed")]
    }
}
