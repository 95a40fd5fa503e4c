//! Editgate - edit-triggered quality gate for coding agents.
//!
//! Each time an agent edits a file, or declares itself done, a hook runs
//! editgate. It decides which external quality tools apply to the edited
//! file, runs them one after another with bounded time budgets, turns their
//! free-text output into findings, and tells the agent whether it may
//! proceed.
//!
//! # Architecture
//!
//! - `runner`: runs shell commands in the repository root with a timeout
//! - `parse`: per-tool output parsers producing `Finding`s
//! - `scope`: file kinds, modified-file narrowing
//! - `dispatch`: pipelines as data and the dispatchers that run them
//! - `report`: blocking and commentary output
//! - `config`: optional YAML overrides for commands and skip paths
//! - `event`: hook payload intake
//!
//! The external tools themselves (linters, compilers, formatters) are
//! collaborators; editgate only looks at their exit status and output.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod event;
pub mod parse;
pub mod report;
pub mod runner;
pub mod scope;

pub use config::Config;
pub use dispatch::{Dispatcher, Mode};
pub use event::Event;
pub use parse::{Category, CheckResult, Finding, Severity, Verdict};
pub use runner::{CommandRunner, ShellRunner};
pub use scope::FileKind;
