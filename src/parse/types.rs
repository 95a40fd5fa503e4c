//! Core types for parsed tool output.

/// Severity levels for findings.
///
/// Only `Error` is blocking. `Warning` and `Info` are both advisory; `Info`
/// carries the "step passed" commentary of the full pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Marker glyph printed in front of a finding in commentary output.
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Error => "❌",
            Severity::Warning => "⚠️",
            Severity::Info => "✓",
        }
    }
}

/// Which kind of check produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Lint,
    Types,
    Duplicates,
    Compile,
    Tests,
    Format,
    Circular,
    UnusedExports,
    Json,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Lint => "lint",
            Category::Types => "types",
            Category::Duplicates => "duplicates",
            Category::Compile => "compile",
            Category::Tests => "tests",
            Category::Format => "format",
            Category::Circular => "circular",
            Category::UnusedExports => "unused_exports",
            Category::Json => "json",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of one external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub succeeded: bool,
    /// Stdout followed by stderr.
    pub output: String,
}

impl CheckResult {
    pub fn passed<S: Into<String>>(output: S) -> Self {
        Self {
            succeeded: true,
            output: output.into(),
        }
    }

    pub fn failed<S: Into<String>>(output: S) -> Self {
        Self {
            succeeded: false,
            output: output.into(),
        }
    }
}

/// A single normalized issue extracted from a tool's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub category: Category,
    pub severity: Severity,
    pub message: String,
    /// Excerpt of the offending tool output, printed under the message.
    pub detail: Option<String>,
}

impl Finding {
    pub fn error<S: Into<String>>(category: Category, message: S) -> Self {
        Self {
            category,
            severity: Severity::Error,
            message: message.into(),
            detail: None,
        }
    }

    pub fn warning<S: Into<String>>(category: Category, message: S) -> Self {
        Self {
            category,
            severity: Severity::Warning,
            message: message.into(),
            detail: None,
        }
    }

    pub fn info<S: Into<String>>(category: Category, message: S) -> Self {
        Self {
            category,
            severity: Severity::Info,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail<S: Into<String>>(mut self, detail: S) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Findings accumulated over one dispatch, in report order.
#[derive(Debug, Clone, Default)]
pub struct Verdict {
    pub findings: Vec<Finding>,
}

impl Verdict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn extend<I: IntoIterator<Item = Finding>>(&mut self, findings: I) {
        self.findings.extend(findings);
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Whether the agent must stop and fix something.
    pub fn has_blocking(&self) -> bool {
        self.findings.iter().any(|f| f.severity.is_blocking())
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

/// Truncate to at most `max` characters.
pub fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
