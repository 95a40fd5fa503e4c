//! Integration tests for the dispatchers.
//!
//! Most tests drive the dispatchers through a scripted runner so no real
//! tools are needed; the last group uses the shell runner with commands
//! overridden in an `editgate.yaml`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use editgate::cli::{finish_complete, finish_full, EXIT_BLOCKED, EXIT_SUCCESS};
use editgate::config::{Config, ToolCommand};
use editgate::{CheckResult, CommandRunner, Dispatcher, Event, Severity, ShellRunner};
use tempfile::TempDir;

/// Answers commands by substring match and records every call.
struct FakeTools {
    answers: Vec<(&'static str, CheckResult)>,
    calls: RefCell<Vec<String>>,
}

impl FakeTools {
    fn new(answers: Vec<(&'static str, CheckResult)>) -> Self {
        Self {
            answers,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl CommandRunner for FakeTools {
    fn run(&self, command: &str, _timeout: Duration) -> CheckResult {
        self.calls.borrow_mut().push(command.to_string());
        self.answers
            .iter()
            .find(|(needle, _)| command.contains(needle))
            .map(|(_, r)| r.clone())
            .unwrap_or_else(|| CheckResult::passed(""))
    }
}

fn messages(verdict: &editgate::Verdict) -> Vec<String> {
    verdict.findings.iter().map(|f| f.message.clone()).collect()
}

#[test]
fn test_vendor_edit_never_invokes_runner() {
    let temp = TempDir::new().unwrap();
    let config = Config::default();
    let tools = FakeTools::new(vec![]);
    let dispatcher = Dispatcher::new(temp.path(), &config, &tools);

    let event = Event::parse(
        r#"{"tool_input":{"file_path":"packages/nextjs/node_modules/viem/index.ts"}}"#,
    );
    assert!(dispatcher.fast(&event).is_none());
    assert!(dispatcher.full(&event).is_none());
    assert_eq!(tools.call_count(), 0);
}

#[test]
fn test_full_script_pipeline_commentary() {
    let temp = TempDir::new().unwrap();
    let config = Config::default();
    let tools = FakeTools::new(vec![
        ("eslint --fix", CheckResult::passed("")),
        (
            "check-types",
            CheckResult::failed(
                "components/Card.tsx(4,10): error TS2339: Property 'x' does not exist.\n",
            ),
        ),
        (
            "jscpd",
            CheckResult::passed("Clone found (tsx):\n - Card.tsx [1:1 - 20:1]\n"),
        ),
        ("quality:circular", CheckResult::passed("no cycles")),
    ]);
    let dispatcher = Dispatcher::new(temp.path(), &config, &tools);

    let verdict = dispatcher
        .full(&Event::for_file("packages/nextjs/components/Card.tsx"))
        .unwrap();

    assert_eq!(
        messages(&verdict),
        vec![
            "Lint passed/fixed",
            "Formatted with Prettier",
            "TypeScript: 1 error(s)",
            "1 duplicate block(s) in components",
            "No circular deps",
        ]
    );
    // components path opens the clone scan but not the unused-export scan
    assert_eq!(tools.call_count(), 5);

    colored::control::set_override(false);
    let mut out = Vec::new();
    let code = finish_full(
        &mut out,
        "packages/nextjs/components/Card.tsx",
        Some(&verdict),
    )
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(code, editgate::cli::EXIT_FAILED);
    assert!(text.starts_with("🔧 Running full pipeline for Card.tsx...\n"));
    assert!(text.contains("❌ TypeScript: 1 error(s)\n"));
    assert!(text.ends_with("🚨 1 error(s) need manual fixing\n"));
}

#[test]
fn test_full_solidity_compile_failure() {
    let temp = TempDir::new().unwrap();
    let config = Config::default();
    let tools = FakeTools::new(vec![(
        "hardhat:compile",
        CheckResult::failed(
            "ParserError: Expected ';' but got '}'\n --> contracts/Vault.sol:9:1\n",
        ),
    )]);
    let dispatcher = Dispatcher::new(temp.path(), &config, &tools);

    let verdict = dispatcher
        .full(&Event::for_file("packages/hardhat/contracts/Vault.sol"))
        .unwrap();
    let compile = &verdict.findings[1];
    assert_eq!(compile.message, "Solidity compile FAILED");
    assert_eq!(
        compile.detail.as_deref(),
        Some("ParserError: Expected ';' but got '}'")
    );
    assert_eq!(verdict.count(Severity::Error), 1);
}

#[test]
fn test_complete_ignores_errors_outside_modified_files() {
    let temp = TempDir::new().unwrap();
    let config = Config::default();
    let tools = FakeTools::new(vec![
        ("next:lint", CheckResult::passed("✔ No ESLint warnings or errors")),
        ("git diff", CheckResult::passed("packages/nextjs/app/page.tsx\n")),
        (
            "check-types",
            CheckResult::failed("hooks/useOld.ts(1,1): error TS2304: Cannot find name 'z'.\n"),
        ),
    ]);
    let verdict = Dispatcher::new(temp.path(), &config, &tools).complete();
    assert!(!verdict.has_blocking());

    let mut err = Vec::new();
    assert_eq!(finish_complete(&mut err, &verdict).unwrap(), EXIT_SUCCESS);
    assert!(err.is_empty());
}

#[test]
fn test_complete_blocks_on_all_three_gates() {
    let temp = TempDir::new().unwrap();
    let config = Config::default();
    let tools = FakeTools::new(vec![
        ("next:lint", CheckResult::failed("✖ 2 errors\n")),
        ("git diff", CheckResult::failed("fatal: not a git repository")),
        (
            "check-types",
            CheckResult::failed("app/page.tsx(2,3): error TS2322: Type mismatch.\n"),
        ),
        (
            "jscpd",
            CheckResult::passed("Found 3 exact clones with 40(2%) duplicated lines"),
        ),
    ]);
    let verdict = Dispatcher::new(temp.path(), &config, &tools).complete();

    assert_eq!(
        messages(&verdict),
        vec![
            "Lint: 2 error(s)",
            "TypeScript: 1 error(s)",
            "Duplicates: 3 clones found",
        ]
    );

    let mut err = Vec::new();
    assert_eq!(finish_complete(&mut err, &verdict).unwrap(), EXIT_BLOCKED);
}

#[test]
fn test_timeouts_never_crash_pipelines() {
    let temp = TempDir::new().unwrap();
    let config = Config::default();
    let tools = FakeTools::new(vec![("", CheckResult::failed("Timed out"))]);
    let dispatcher = Dispatcher::new(temp.path(), &config, &tools);

    for file in [
        "packages/nextjs/hooks/useX.ts",
        "packages/hardhat/contracts/Vault.sol",
        "packages/snfoundry/contracts/src/lib.cairo",
    ] {
        let verdict = dispatcher.full(&Event::for_file(file)).unwrap();
        assert!(!verdict.is_empty(), "{}", file);
    }
    assert!(!dispatcher.complete().has_blocking());
    assert!(!dispatcher
        .fast(&Event::for_file("app/page.tsx"))
        .unwrap()
        .has_blocking());
}

#[cfg(unix)]
mod shell {
    use super::*;

    fn fake_config(overrides: HashMap<&str, &str>) -> Config {
        let mut config = Config::default();
        let c = &mut config.commands;
        for (key, run) in overrides {
            let cmd = ToolCommand::new(run, 10);
            match key {
                "fast_lint" => c.fast_lint = cmd,
                "fast_format" => c.fast_format = cmd,
                _ => panic!("unexpected key {}", key),
            }
        }
        config
    }

    #[test]
    fn test_fast_path_with_real_shell() {
        let temp = TempDir::new().unwrap();
        let config = fake_config(HashMap::from([
            ("fast_lint", "printf '  ! no-debugger: {file}\\n'"),
            ("fast_format", "touch formatted.marker"),
        ]));
        let runner = ShellRunner::new(temp.path());
        let verdict = Dispatcher::new(temp.path(), &config, &runner)
            .fast(&Event::for_file("app/page.tsx"))
            .unwrap();

        assert_eq!(verdict.findings.len(), 1);
        assert_eq!(
            verdict.findings[0].message,
            "oxlint: ! no-debugger: app/page.tsx"
        );
        // format runs in the repository root, not the test's cwd
        assert!(temp.path().join("formatted.marker").exists());
    }

    #[test]
    fn test_no_format_skips_side_effect() {
        let temp = TempDir::new().unwrap();
        let config = fake_config(HashMap::from([
            ("fast_lint", "true"),
            ("fast_format", "touch formatted.marker"),
        ]));
        let runner = ShellRunner::new(temp.path());
        let verdict = Dispatcher::new(temp.path(), &config, &runner)
            .formatting(false)
            .fast(&Event::for_file("app/page.tsx"))
            .unwrap();

        assert!(verdict.is_empty());
        assert!(!temp.path().join("formatted.marker").exists());
    }
}
