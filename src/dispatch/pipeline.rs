//! Declarative check pipelines and the executor that runs them.
//!
//! A pipeline is an ordered list of [`Step`]s. Each step names a command, an
//! optional path gate, and what to do with the result: either a best-effort
//! in-place rewrite ([`Action::Format`]) or a pure parse into findings
//! ([`Action::Check`]).

use std::collections::HashSet;

use crate::config::{Config, ToolCommand};
use crate::parse::{self, Category, CheckResult, Finding, Verdict};
use crate::runner::CommandRunner;
use crate::scope::{self, FileKind};

/// Which per-edit pipeline family to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Low-latency checks, silent unless something blocks.
    Fast,
    /// Every tool, with running commentary.
    Full,
}

/// How a command's output turns into findings.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    FastLint { tool: String },
    LintSummary,
    LintFix,
    TypeCheck {
        /// Command listing modified files; narrows errors when present.
        narrow_with: Option<ToolCommand>,
        /// Emit an info line when the run succeeds.
        report_clean: bool,
    },
    ExactClones,
    CloneCount {
        scope: &'static str,
        report_clean: bool,
    },
    Compile { language: &'static str },
    Tests { language: &'static str },
    Circular,
    UnusedExports,
}

impl Check {
    /// Turn one run into findings.
    pub fn parse(
        &self,
        result: &CheckResult,
        modified: Option<&HashSet<String>>,
    ) -> Vec<Finding> {
        match self {
            Check::FastLint { tool } => parse::parse_fast_lint(result, tool),
            Check::LintSummary => parse::parse_lint_summary(result),
            Check::LintFix => parse::parse_lint_fix(result),
            Check::TypeCheck { report_clean, .. } => {
                if result.succeeded && *report_clean {
                    return vec![Finding::info(Category::Types, "TypeScript compiles")];
                }
                parse::parse_type_errors(result, modified)
            }
            Check::ExactClones => parse::parse_exact_clones(result),
            Check::CloneCount {
                scope,
                report_clean,
            } => parse::parse_clone_count(result, scope, *report_clean),
            Check::Compile { language } => parse::parse_compile(result, language),
            Check::Tests { language } => parse::parse_test_run(result, language),
            Check::Circular => parse::parse_circular(result),
            Check::UnusedExports => parse::parse_unused_exports(result),
        }
    }
}

/// What a step does with its command.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Rewrites files in place. Only success matters; failure is ignored.
    Format { note: Option<&'static str> },
    Check(Check),
}

/// Whether a step applies to the edited path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// Path must contain at least one of these substrings.
    PathContains(&'static [&'static str]),
}

impl Gate {
    pub fn allows(&self, file: Option<&str>) -> bool {
        match self {
            Gate::Always => true,
            Gate::PathContains(needles) => {
                file.is_some_and(|f| needles.iter().any(|n| f.contains(n)))
            }
        }
    }
}

/// One entry of a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub label: &'static str,
    pub command: ToolCommand,
    pub action: Action,
    pub gate: Gate,
}

impl Step {
    fn check(label: &'static str, command: &ToolCommand, check: Check) -> Self {
        Self {
            label,
            command: command.clone(),
            action: Action::Check(check),
            gate: Gate::Always,
        }
    }

    fn format(label: &'static str, command: &ToolCommand, note: Option<&'static str>) -> Self {
        Self {
            label,
            command: command.clone(),
            action: Action::Format { note },
            gate: Gate::Always,
        }
    }

    fn gated(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }
}

const COMPONENT_PATHS: &[&str] = &["components"];
const GRAPH_PATHS: &[&str] = &["/hooks/", "/utils/"];

/// Whether an edit to a file of `kind` gets any check in `mode`.
pub fn handles(kind: FileKind, mode: Mode) -> bool {
    matches!(
        (mode, kind),
        (Mode::Fast, FileKind::Script | FileKind::Json)
            | (Mode::Full, FileKind::Script | FileKind::Solidity | FileKind::Cairo)
    )
}

/// Steps for one edited file of `kind`.
///
/// JSON and unrecognized files have no command pipeline.
pub fn per_edit_pipeline(kind: FileKind, mode: Mode, config: &Config) -> Vec<Step> {
    let c = &config.commands;
    match (mode, kind) {
        (Mode::Fast, FileKind::Script) => vec![
            Step::check(
                "fast lint",
                &c.fast_lint,
                Check::FastLint {
                    tool: config.fast_lint_tool.clone(),
                },
            ),
            Step::format("format", &c.fast_format, None),
        ],
        (Mode::Full, FileKind::Solidity) => vec![
            Step::format("format", &c.format, Some("Formatted Solidity")),
            Step::check(
                "compile",
                &c.solidity_compile,
                Check::Compile {
                    language: "Solidity",
                },
            ),
            Step::check(
                "duplicates",
                &c.contract_clones,
                Check::CloneCount {
                    scope: "contracts",
                    report_clean: false,
                },
            ),
        ],
        (Mode::Full, FileKind::Script) => vec![
            Step::check("lint", &c.lint_fix, Check::LintFix),
            Step::format("format", &c.format, Some("Formatted with Prettier")),
            Step::check(
                "type check",
                &c.type_check_full,
                Check::TypeCheck {
                    narrow_with: None,
                    report_clean: true,
                },
            ),
            Step::check(
                "duplicates",
                &c.component_clones,
                Check::CloneCount {
                    scope: "components",
                    report_clean: true,
                },
            )
            .gated(Gate::PathContains(COMPONENT_PATHS)),
            Step::check("circular deps", &c.circular, Check::Circular),
            Step::check("unused exports", &c.unused_exports, Check::UnusedExports)
                .gated(Gate::PathContains(GRAPH_PATHS)),
        ],
        (Mode::Full, FileKind::Cairo) => vec![
            Step::format("format", &c.cairo_format, Some("Formatted Cairo")),
            Step::check(
                "compile",
                &c.cairo_compile,
                Check::Compile { language: "Cairo" },
            ),
            Step::check("tests", &c.cairo_test, Check::Tests { language: "Cairo" }),
        ],
        _ => Vec::new(),
    }
}

/// Steps run when the agent declares the session complete.
pub fn completion_pipeline(config: &Config) -> Vec<Step> {
    let c = &config.commands;
    vec![
        Step::check("lint", &c.lint, Check::LintSummary),
        Step::check(
            "type check",
            &c.type_check,
            Check::TypeCheck {
                narrow_with: Some(c.modified_files.clone()),
                report_clean: false,
            },
        ),
        Step::check("duplicates", &c.duplicates, Check::ExactClones),
    ]
}

/// Runs pipelines one step at a time through a [`CommandRunner`].
pub struct Executor<'a> {
    runner: &'a dyn CommandRunner,
    formatting: bool,
}

impl<'a> Executor<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self {
            runner,
            formatting: true,
        }
    }

    /// Set whether format steps run at all.
    pub fn formatting(mut self, enabled: bool) -> Self {
        self.formatting = enabled;
        self
    }

    /// Run `steps` in order for the edited `file` (if any).
    pub fn run(&self, steps: &[Step], file: Option<&str>) -> Verdict {
        let mut verdict = Verdict::new();

        for step in steps {
            if !step.gate.allows(file) {
                tracing::trace!(step = step.label, "gate closed, skipping");
                continue;
            }

            match &step.action {
                Action::Format { note } => {
                    if !self.formatting {
                        tracing::debug!(step = step.label, "formatting disabled");
                        continue;
                    }
                    let result = self
                        .runner
                        .run(&step.command.render(file), step.command.timeout());
                    if result.succeeded {
                        if let Some(note) = note {
                            verdict.add(Finding::info(Category::Format, *note));
                        }
                    } else {
                        tracing::debug!(step = step.label, "format failed, ignoring");
                    }
                }
                Action::Check(check) => {
                    let modified = match check {
                        Check::TypeCheck {
                            narrow_with: Some(cmd),
                            ..
                        } => scope::modified_basenames(self.runner, cmd),
                        _ => None,
                    };
                    let result = self
                        .runner
                        .run(&step.command.render(file), step.command.timeout());
                    let findings = check.parse(&result, modified.as_ref());
                    tracing::debug!(
                        step = step.label,
                        succeeded = result.succeeded,
                        findings = findings.len(),
                        "step done"
                    );
                    for finding in &findings {
                        tracing::debug!(
                            category = %finding.category,
                            blocking = finding.severity.is_blocking(),
                            "{}",
                            finding.message
                        );
                    }
                    verdict.extend(findings);
                }
            }
        }

        verdict
    }
}
