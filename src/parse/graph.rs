//! Parsers for module-graph checks: circular imports and unused exports.

use super::{Category, CheckResult, Finding};

/// Below this many mentions the unused-export scan is considered noise.
const UNUSED_THRESHOLD: usize = 5;

pub fn parse_circular(result: &CheckResult) -> Vec<Finding> {
    let lower = result.output.to_lowercase();
    if lower.contains("error") || lower.contains("circular") {
        vec![Finding::warning(
            Category::Circular,
            "Circular dependencies detected",
        )]
    } else {
        vec![Finding::info(Category::Circular, "No circular deps")]
    }
}

pub fn parse_unused_exports(result: &CheckResult) -> Vec<Finding> {
    let count = result.output.to_lowercase().matches("unused").count();
    if count > UNUSED_THRESHOLD {
        vec![Finding::warning(
            Category::UnusedExports,
            format!("~{} unused exports detected", count),
        )]
    } else {
        Vec::new()
    }
}
