//! Parser for TypeScript compiler output.

use std::collections::HashSet;

use super::{truncate, Category, CheckResult, Finding};

/// Marker the TypeScript compiler prints on every diagnostic line.
const TS_ERROR_MARKER: &str = "error TS";

/// Excerpt length when reporting against modified files only.
pub const NARROWED_EXCERPT_LEN: usize = 100;
/// Excerpt length for a full, session-wide report.
pub const FULL_EXCERPT_LEN: usize = 120;

/// Parse a failed type-check run.
///
/// When `modified` is given, only diagnostics mentioning one of those file
/// basenames are kept. A successful run yields nothing.
pub fn parse_type_errors(
    result: &CheckResult,
    modified: Option<&HashSet<String>>,
) -> Vec<Finding> {
    if result.succeeded {
        return Vec::new();
    }

    let mut error_lines: Vec<&str> = result
        .output
        .lines()
        .filter(|line| line.contains(TS_ERROR_MARKER))
        .collect();

    let (message, excerpt_len) = match modified {
        Some(names) => {
            error_lines.retain(|line| names.iter().any(|name| line.contains(name.as_str())));
            ("error(s) in modified files", NARROWED_EXCERPT_LEN)
        }
        None => ("error(s)", FULL_EXCERPT_LEN),
    };

    match error_lines.first() {
        Some(first) => vec![Finding::error(
            Category::Types,
            format!("TypeScript: {} {}", error_lines.len(), message),
        )
        .with_detail(truncate(first, excerpt_len))],
        None => Vec::new(),
    }
}
