//! Event dispatchers: pick the pipeline for an event and run it.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::event::Event;
use crate::parse::{self, Verdict};
use crate::runner::CommandRunner;
use crate::scope::FileKind;

use super::pipeline::{completion_pipeline, per_edit_pipeline, Executor, Mode};

/// Dispatches hook events against one repository.
///
/// Holds no state between calls; every dispatch is an independent run.
pub struct Dispatcher<'a> {
    root: PathBuf,
    config: &'a Config,
    runner: &'a dyn CommandRunner,
    formatting: bool,
}

impl<'a> Dispatcher<'a> {
    pub fn new<P: AsRef<Path>>(root: P, config: &'a Config, runner: &'a dyn CommandRunner) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
            runner,
            formatting: true,
        }
    }

    /// Set whether in-place formatting steps run.
    pub fn formatting(mut self, enabled: bool) -> Self {
        self.formatting = enabled;
        self
    }

    fn executor(&self) -> Executor<'a> {
        Executor::new(self.runner).formatting(self.formatting)
    }

    /// The edited path, if it is in scope at all.
    fn edited_path<'e>(&self, event: &'e Event) -> Option<&'e str> {
        let path = event.file_path.as_deref()?;
        if self.config.is_skipped(path) {
            tracing::debug!(path, "generated or vendored path, skipping");
            return None;
        }
        Some(path)
    }

    /// Fast per-edit checks. `None` means the event was out of scope.
    pub fn fast(&self, event: &Event) -> Option<Verdict> {
        let path = self.edited_path(event)?;
        let kind = FileKind::from_path(path);
        tracing::debug!(path, %kind, "fast dispatch");

        if kind == FileKind::Json {
            let mut verdict = Verdict::new();
            verdict.extend(parse::check_json_file(&self.root.join(path)));
            return Some(verdict);
        }

        let steps = per_edit_pipeline(kind, Mode::Fast, self.config);
        if steps.is_empty() {
            return None;
        }
        Some(self.executor().run(&steps, Some(path)))
    }

    /// Full per-edit pipeline. `None` means the event was out of scope.
    pub fn full(&self, event: &Event) -> Option<Verdict> {
        let path = self.edited_path(event)?;
        let kind = FileKind::from_path(path);
        tracing::debug!(path, %kind, "full dispatch");

        let steps = per_edit_pipeline(kind, Mode::Full, self.config);
        if steps.is_empty() {
            return None;
        }
        Some(self.executor().run(&steps, Some(path)))
    }

    /// Session-completion gate; independent of any edited file.
    pub fn complete(&self) -> Verdict {
        tracing::debug!("completion dispatch");
        self.executor().run(&completion_pipeline(self.config), None)
    }
}
