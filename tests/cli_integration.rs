//! End-to-end tests of the editgate binary: stdin payload in, exit code and
//! streams out.

#![cfg(unix)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn editgate(root: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_editgate"))
        .args(args)
        .arg("--root")
        .arg(root)
        .env_remove("EDITGATE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("should spawn editgate");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().expect("should wait for editgate")
}

fn payload(file: &str) -> String {
    serde_json::json!({
        "hook_event_name": "PostToolUse",
        "tool_name": "Edit",
        "tool_input": { "file_path": file }
    })
    .to_string()
}

/// Config whose commands are plain shell builtins standing in for the tools.
fn write_config(root: &Path, body: &str) {
    std::fs::write(root.join("editgate.yaml"), body).unwrap();
}

#[test]
fn test_empty_and_malformed_input_are_silent() {
    let temp = TempDir::new().unwrap();
    for input in ["", "not json at all", "{\"tool_input\": 3}"] {
        for hook in ["fast", "full"] {
            let out = editgate(temp.path(), &[hook], input);
            assert_eq!(out.status.code(), Some(0), "{} {:?}", hook, input);
            assert!(out.stdout.is_empty());
            assert!(out.stderr.is_empty());
        }
    }
}

#[test]
fn test_vendor_and_unsupported_paths_are_silent() {
    let temp = TempDir::new().unwrap();
    // Any command that did run would leave this marker behind.
    write_config(
        temp.path(),
        "commands:\n  fast_lint:\n    run: touch ran.marker\n  fast_format:\n    run: touch ran.marker\n",
    );

    for file in [
        "packages/nextjs/node_modules/x/index.ts",
        "packages/nextjs/.next/types/app.ts",
        "docs/README.md",
    ] {
        let out = editgate(temp.path(), &["fast"], &payload(file));
        assert_eq!(out.status.code(), Some(0), "{}", file);
        assert!(out.stderr.is_empty());
    }
    assert!(!temp.path().join("ran.marker").exists());
}

#[test]
fn test_invalid_json_blocks_with_line_number() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("package.json"),
        "{\n  \"name\": \"app\"\n  \"private\": true\n}\n",
    )
    .unwrap();

    let out = editgate(temp.path(), &["fast"], &payload("package.json"));
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("package.json: invalid JSON"));
    assert!(stderr.contains("at line 3"));

    std::fs::write(temp.path().join("package.json"), "{\"name\": \"app\"}").unwrap();
    let out = editgate(temp.path(), &["fast"], &payload("package.json"));
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stderr.is_empty());
}

#[test]
fn test_complete_blocks_on_clones() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r#"
commands:
  lint:
    run: echo 'no problems, 0 errors'
  type_check:
    run: "true"
  modified_files:
    run: "false"
  duplicates:
    run: echo 'Found 3 exact clones (duplicated lines)'
"#,
    );

    let out = editgate(temp.path(), &["on-complete"], "");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("fix before completing"));
    assert!(stderr.contains("Duplicates: 3 clones found"));
}

#[test]
fn test_full_prints_commentary() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r#"
commands:
  cairo_format:
    run: "true"
  cairo_compile:
    run: echo compiled
  cairo_test:
    run: echo '1 failed' && exit 1
"#,
    );

    let out = editgate(temp.path(), &["full"], &payload("contracts/src/lib.cairo"));
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Running full pipeline for lib.cairo"));
    assert!(stdout.contains("Formatted Cairo"));
    assert!(stdout.contains("Cairo compiles"));
    assert!(stdout.contains("Cairo tests failed"));
    assert!(stdout.contains("All good, 1 warning(s) to consider"));
}

#[test]
fn test_out_of_scope_edits_ignore_broken_config() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "commands: [broken");

    for (hook, file) in [
        ("fast", "docs/README.md"),
        ("full", "docs/README.md"),
        ("fast", "packages/nextjs/node_modules/x/index.ts"),
        ("full", "packages/hardhat/artifacts/Vault.sol"),
    ] {
        let out = editgate(temp.path(), &[hook], &payload(file));
        assert_eq!(out.status.code(), Some(0), "{} {}", hook, file);
        assert!(out.stdout.is_empty(), "{} {}", hook, file);
        assert!(out.stderr.is_empty(), "{} {}", hook, file);
    }
}

#[test]
fn test_bad_config_is_not_blocking() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "commands: [broken");

    let out = editgate(temp.path(), &["fast"], &payload("app/page.tsx"));
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    let prefix = format!(
        "Error: parsing {}: ",
        temp.path().canonicalize().unwrap().join("editgate.yaml").display()
    );
    let detail = stderr.trim_end().strip_prefix(prefix.as_str()).unwrap();
    assert!(!detail.is_empty());
    // The YAML message is printed once, via the source chain.
    let mid = detail
        .char_indices()
        .nth(detail.chars().count() / 2)
        .map_or(0, |(i, _)| i);
    let (first, second) = detail.split_at(mid);
    assert_ne!(first.trim_end_matches(": "), second.trim_start_matches(": "));
}
