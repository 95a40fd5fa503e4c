//! Parsers for duplicate-code scanner output (jscpd).

use lazy_static::lazy_static;
use regex::Regex;

use super::{Category, CheckResult, Finding};

lazy_static! {
    static ref EXACT_CLONES: Regex = Regex::new(r"(\d+)\s+exact clones").unwrap();
}

/// Literal line the console reporter prints once per clone.
const CLONE_MARKER: &str = "Clone found";

/// Parse the summary of a silent scan. Any clone is blocking.
pub fn parse_exact_clones(result: &CheckResult) -> Vec<Finding> {
    if !result.output.to_lowercase().contains("duplicated lines") {
        return Vec::new();
    }

    let count = EXACT_CLONES
        .captures(&result.output)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .unwrap_or(0);

    if count == 0 {
        return Vec::new();
    }

    vec![Finding::error(
        Category::Duplicates,
        format!("Duplicates: {} clones found", count),
    )]
}

/// Count clones reported by the console reporter. Never blocking.
///
/// `report_clean` adds an info line when nothing was found.
pub fn parse_clone_count(result: &CheckResult, scope: &str, report_clean: bool) -> Vec<Finding> {
    let count = result.output.matches(CLONE_MARKER).count();
    if count > 0 {
        vec![Finding::warning(
            Category::Duplicates,
            format!("{} duplicate block(s) in {}", count, scope),
        )]
    } else if report_clean {
        vec![Finding::info(
            Category::Duplicates,
            format!("No duplicates in {}", scope),
        )]
    } else {
        Vec::new()
    }
}
