//! Output formatting for verdicts.
//!
//! Two styles exist:
//! - Blocking: written only when the agent must stop, header plus every
//!   finding, meant for stderr
//! - Commentary: the full pipeline's running log with one marker per step
//!   and a closing summary, meant for stdout

use colored::*;
use std::io::{self, Write};

use crate::parse::{Finding, Severity, Verdict};

/// Header for blocking output at session completion.
pub const COMPLETION_HEADER: &str = "🔎 Quality check found issues (fix before completing):";

/// Header for blocking output after a single edit.
pub fn edit_header(name: &str) -> String {
    format!("⚠️ {}:", name)
}

fn write_finding<W: Write>(out: &mut W, indent: &str, finding: &Finding) -> io::Result<()> {
    let marker = match finding.severity {
        Severity::Error => finding.severity.marker().red(),
        Severity::Warning => finding.severity.marker().yellow(),
        Severity::Info => finding.severity.marker().green(),
    };
    writeln!(out, "{}{} {}", indent, marker, finding.message)?;
    if let Some(detail) = &finding.detail {
        writeln!(out, "{}   {}", indent, detail.dimmed())?;
    }
    Ok(())
}

/// Write a blocking report: header, then every finding indented.
pub fn write_blocking<W: Write>(out: &mut W, header: &str, verdict: &Verdict) -> io::Result<()> {
    writeln!(out, "{}", header.bold())?;
    for finding in &verdict.findings {
        write_finding(out, "  ", finding)?;
    }
    Ok(())
}

/// One-line outcome of a full pipeline run.
pub fn summary_line(verdict: &Verdict) -> String {
    let errors = verdict.count(Severity::Error);
    let warnings = verdict.count(Severity::Warning);

    if errors > 0 {
        format!("🚨 {} error(s) need manual fixing", errors)
    } else if warnings > 0 {
        format!("⚡ All good, {} warning(s) to consider", warnings)
    } else {
        "✅ All checks passed!".to_string()
    }
}

/// Write the full pipeline's commentary for the file `name`.
pub fn write_commentary<W: Write>(out: &mut W, name: &str, verdict: &Verdict) -> io::Result<()> {
    writeln!(out, "🔧 Running full pipeline for {}...", name)?;
    for finding in &verdict.findings {
        write_finding(out, "", finding)?;
    }
    writeln!(out)?;

    let summary = summary_line(verdict);
    let summary = if verdict.count(Severity::Error) > 0 {
        summary.red()
    } else if verdict.count(Severity::Warning) > 0 {
        summary.yellow()
    } else {
        summary.green()
    };
    writeln!(out, "{}", summary)
}
