//! Extractors that turn raw tool output into findings.
//!
//! Every parser is pure text analysis: it never runs a command and never
//! fails. A timed-out or crashed tool is just another `CheckResult`.

mod build;
mod duplicates;
mod fast_lint;
mod graph;
mod json;
mod lint;
mod typecheck;
mod types;

pub use build::{parse_compile, parse_test_run};
pub use duplicates::{parse_clone_count, parse_exact_clones};
pub use fast_lint::parse_fast_lint;
pub use graph::{parse_circular, parse_unused_exports};
pub use json::{check_json, check_json_file};
pub use lint::{parse_lint_fix, parse_lint_summary};
pub use typecheck::{parse_type_errors, FULL_EXCERPT_LEN, NARROWED_EXCERPT_LEN};
pub use types::{truncate, Category, CheckResult, Finding, Severity, Verdict};
