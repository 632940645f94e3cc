//! Deterministic mapping from (date, naming policy, process identity, prefix,
//! convention template) to a log file path, with a session-stable cache for
//! per-run naming.

use crate::config::{Config, FileNaming};
use crate::entry;
use crate::internal;
use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

/// Process-wide mutable state shared between dispatch and path resolution.
///
/// `last_time` anchors both `processing_time` computation and the "current"
/// date used for file naming, so append and retrieval stay consistent within
/// a single call's processing. `per_run_path` is set once and never rotates
/// mid-process, even across date boundaries.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Wall-clock of the previous log call, if any this process lifetime.
    pub last_time: Option<NaiveDateTime>,
    /// Cached per-run file path, stable for the process lifetime.
    pub per_run_path: Option<PathBuf>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the cached path and timestamp. Intended for test harnesses only.
    pub fn reset(&mut self) {
        self.last_time = None;
        self.per_run_path = None;
    }
}

/// Resolves log file paths against the configured naming policy.
///
/// Cheap to clone — shares the config and session state handles.
#[derive(Clone)]
pub struct PathResolver {
    config: Arc<Config>,
    state: Arc<Mutex<SessionState>>,
}

impl PathResolver {
    #[must_use]
    pub fn new(config: Arc<Config>, state: Arc<Mutex<SessionState>>) -> Self {
        Self { config, state }
    }

    /// Path for an explicit date in `YYYY_MM_DD` form:
    /// `{log_path}/{log_prefix}_log_{date}.log`.
    #[must_use]
    pub fn dated(&self, date: &str) -> PathBuf {
        self.config
            .log_path()
            .join(format!("{}_log_{date}.log", self.config.prefix()))
    }

    /// Path for the current file, branching on the rotation policy.
    ///
    /// Under per-run naming the first resolution renders the convention
    /// template and caches the result; later calls return the cached path
    /// unchanged. Under daily naming the path is keyed by the anchor date.
    #[must_use]
    pub fn resolve(&self) -> PathBuf {
        match self.config.file_naming() {
            FileNaming::PerRun => {
                let mut state = self
                    .state
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                if let Some(path) = &state.per_run_path {
                    return path.clone();
                }
                let anchor = state
                    .last_time
                    .unwrap_or_else(|| Local::now().naive_local());
                let file_name = render_convention(
                    &self.config.file_name_convention(),
                    anchor,
                    &self.config.prefix(),
                );
                let path = self.config.log_path().join(file_name);
                internal::debug(
                    "PATHS",
                    &format!("Per-run log file pinned: {}", path.display()),
                );
                state.per_run_path = Some(path.clone());
                path
            }
            FileNaming::Daily => {
                let anchor = self
                    .state
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .last_time
                    .unwrap_or_else(|| Local::now().naive_local());
                self.dated(&anchor.format("%Y_%m_%d").to_string())
            }
        }
    }
}

/// Renders the per-run naming convention. The full-timestamp token is
/// substituted before the date-only token, which is its prefix.
fn render_convention(convention: &str, anchor: NaiveDateTime, prefix: &str) -> String {
    convention
        .replace(
            "YYYY_MM_DD_HH_MM_SS",
            &anchor.format("%Y_%m_%d_%H_%M_%S").to_string(),
        )
        .replace("YYYY_MM_DD", &anchor.format("%Y_%m_%d").to_string())
        .replace("[process]", entry::process_name())
        .replace("${LOG_PREFIX}", prefix)
}
