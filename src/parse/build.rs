//! Parsers for contract compiler and test runner output.

use super::{truncate, Category, CheckResult, Finding};

const COMPILE_EXCERPT_LEN: usize = 120;

/// Parse a compile run for `language` (e.g. "Solidity", "Cairo").
pub fn parse_compile(result: &CheckResult, language: &str) -> Vec<Finding> {
    if !result.succeeded && result.output.to_lowercase().contains("error") {
        let mut finding = Finding::error(
            Category::Compile,
            format!("{} compile FAILED", language),
        );
        if let Some(line) = result
            .output
            .lines()
            .find(|line| line.to_lowercase().contains("error"))
        {
            finding = finding.with_detail(truncate(line.trim(), COMPILE_EXCERPT_LEN));
        }
        return vec![finding];
    }

    vec![Finding::info(
        Category::Compile,
        format!("{} compiles", language),
    )]
}

/// Parse a test-suite run. Failures are surfaced but never block.
pub fn parse_test_run(result: &CheckResult, language: &str) -> Vec<Finding> {
    if result.succeeded {
        vec![Finding::info(
            Category::Tests,
            format!("{} tests pass", language),
        )]
    } else {
        vec![Finding::warning(
            Category::Tests,
            format!("{} tests failed", language),
        )]
    }
}
