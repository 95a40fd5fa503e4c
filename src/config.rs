//! Configuration for editgate.
//!
//! Every field is optional. An `editgate.yaml` in the repository root only
//! needs to name what differs from the defaults. A command override keeps
//! the role's default timeout unless it sets its own, e.g.
//!
//! ```yaml
//! skip_paths: [node_modules, dist]
//! commands:
//!   lint:
//!     run: pnpm lint --quiet 2>&1
//!     timeout_secs: 90
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Config file names searched for in the repository root.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["editgate.yaml", ".editgate.yaml"];

/// Placeholder replaced by the (shell-quoted) edited file path.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// Errors loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading {}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing {}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid command {name:?}: {reason}")]
    Invalid { name: &'static str, reason: String },
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
}

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path substrings marking generated or vendored files.
    pub skip_paths: Vec<String>,
    /// Name prefixed to fast-lint findings.
    pub fast_lint_tool: String,
    pub commands: Commands,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skip_paths: [
                "node_modules",
                ".next",
                "typechain-types",
                "artifacts",
                "cache",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            fast_lint_tool: "oxlint".to_string(),
            commands: Commands::default(),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::default().merge(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Layer a parsed file over the defaults, field by field.
    fn merge(mut self, file: ConfigFile) -> Result<Self, ConfigError> {
        if let Some(skip_paths) = file.skip_paths {
            self.skip_paths = skip_paths;
        }
        if let Some(tool) = file.fast_lint_tool {
            self.fast_lint_tool = tool;
        }
        for (name, patch) in file.commands {
            let cmd = self
                .commands
                .get_mut(&name)
                .ok_or(ConfigError::UnknownCommand(name))?;
            if let Some(run) = patch.run {
                cmd.run = run;
            }
            if let Some(timeout_secs) = patch.timeout_secs {
                cmd.timeout_secs = timeout_secs;
            }
        }
        Ok(self)
    }

    /// Load `explicit` if given, else the first default config file found in
    /// `root`, else the built-in defaults.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::parse_file(path);
        }
        for name in DEFAULT_CONFIG_NAMES {
            let path = root.join(name);
            if path.is_file() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::parse_file(path);
            }
        }
        Ok(Self::default())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, cmd) in self.commands.entries() {
            if cmd.run.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    name,
                    reason: "command is empty".to_string(),
                });
            }
            if cmd.timeout_secs == 0 {
                return Err(ConfigError::Invalid {
                    name,
                    reason: "timeout_secs must be positive".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Whether a path sits under a generated or vendored location.
    pub fn is_skipped(&self, path: &str) -> bool {
        crate::scope::is_generated_path(path, &self.skip_paths)
    }
}

/// On-disk shape of the config file; everything absent keeps its default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    skip_paths: Option<Vec<String>>,
    fast_lint_tool: Option<String>,
    commands: BTreeMap<String, CommandPatch>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CommandPatch {
    run: Option<String>,
    timeout_secs: Option<u64>,
}

/// One external command and its time budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub run: String,
    pub timeout_secs: u64,
}

impl ToolCommand {
    pub fn new<S: Into<String>>(run: S, timeout_secs: u64) -> Self {
        Self {
            run: run.into(),
            timeout_secs,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Substitute the edited file into the command line.
    pub fn render(&self, file: Option<&str>) -> String {
        match file {
            Some(f) => self
                .run
                .replace(FILE_PLACEHOLDER, &crate::runner::shell_quote(f)),
            None => self.run.clone(),
        }
    }
}

/// The collaborator commands, keyed by role.
#[derive(Debug, Clone)]
pub struct Commands {
    pub fast_lint: ToolCommand,
    pub fast_format: ToolCommand,
    pub lint: ToolCommand,
    pub lint_fix: ToolCommand,
    pub format: ToolCommand,
    pub type_check: ToolCommand,
    pub type_check_full: ToolCommand,
    pub duplicates: ToolCommand,
    pub component_clones: ToolCommand,
    pub contract_clones: ToolCommand,
    pub circular: ToolCommand,
    pub unused_exports: ToolCommand,
    pub solidity_compile: ToolCommand,
    pub cairo_format: ToolCommand,
    pub cairo_compile: ToolCommand,
    pub cairo_test: ToolCommand,
    pub modified_files: ToolCommand,
}

impl Default for Commands {
    fn default() -> Self {
        Self {
            fast_lint: ToolCommand::new("./node_modules/.bin/oxlint {file} 2>&1", 5),
            fast_format: ToolCommand::new("npx prettier --write {file} 2>/dev/null", 5),
            lint: ToolCommand::new("yarn next:lint --quiet 2>&1", 60),
            lint_fix: ToolCommand::new("npx eslint --fix {file} 2>&1", 120),
            format: ToolCommand::new("npx prettier --write {file}", 120),
            type_check: ToolCommand::new("yarn next:check-types 2>&1", 90),
            type_check_full: ToolCommand::new("yarn next:check-types 2>&1", 120),
            duplicates: ToolCommand::new(
                "npx jscpd packages/nextjs/components --min-tokens 50 --silent 2>&1",
                60,
            ),
            component_clones: ToolCommand::new(
                "npx jscpd packages/nextjs/components --reporters console --min-tokens 50 2>&1",
                60,
            ),
            contract_clones: ToolCommand::new(
                "npx jscpd packages/hardhat/contracts --reporters console --min-tokens 50 2>&1",
                60,
            ),
            circular: ToolCommand::new("yarn quality:circular 2>&1", 60),
            unused_exports: ToolCommand::new("npx knip --include exports --no-exit-code 2>&1", 90),
            solidity_compile: ToolCommand::new("yarn hardhat:compile --quiet 2>&1", 120),
            cairo_format: ToolCommand::new("cd packages/snfoundry/contracts && scarb fmt", 120),
            cairo_compile: ToolCommand::new("yarn sncompile 2>&1", 120),
            cairo_test: ToolCommand::new("yarn sntest 2>&1", 180),
            modified_files: ToolCommand::new("git diff --name-only HEAD 2>/dev/null", 5),
        }
    }
}

impl Commands {
    fn get_mut(&mut self, name: &str) -> Option<&mut ToolCommand> {
        let cmd = match name {
            "fast_lint" => &mut self.fast_lint,
            "fast_format" => &mut self.fast_format,
            "lint" => &mut self.lint,
            "lint_fix" => &mut self.lint_fix,
            "format" => &mut self.format,
            "type_check" => &mut self.type_check,
            "type_check_full" => &mut self.type_check_full,
            "duplicates" => &mut self.duplicates,
            "component_clones" => &mut self.component_clones,
            "contract_clones" => &mut self.contract_clones,
            "circular" => &mut self.circular,
            "unused_exports" => &mut self.unused_exports,
            "solidity_compile" => &mut self.solidity_compile,
            "cairo_format" => &mut self.cairo_format,
            "cairo_compile" => &mut self.cairo_compile,
            "cairo_test" => &mut self.cairo_test,
            "modified_files" => &mut self.modified_files,
            _ => return None,
        };
        Some(cmd)
    }

    fn entries(&self) -> [(&'static str, &ToolCommand); 17] {
        [
            ("fast_lint", &self.fast_lint),
            ("fast_format", &self.fast_format),
            ("lint", &self.lint),
            ("lint_fix", &self.lint_fix),
            ("format", &self.format),
            ("type_check", &self.type_check),
            ("type_check_full", &self.type_check_full),
            ("duplicates", &self.duplicates),
            ("component_clones", &self.component_clones),
            ("contract_clones", &self.contract_clones),
            ("circular", &self.circular),
            ("unused_exports", &self.unused_exports),
            ("solidity_compile", &self.solidity_compile),
            ("cairo_format", &self.cairo_format),
            ("cairo_compile", &self.cairo_compile),
            ("cairo_test", &self.cairo_test),
            ("modified_files", &self.modified_files),
        ]
    }
}
