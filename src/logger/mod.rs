//! Classification & dispatch — a log call becomes a classified, timestamped
//! entry fanned out to every enabled sink, with optional notification
//! triggers. Sink failures are reported to the side channel and swallowed;
//! logging must never crash the host application.

mod builder;

pub use builder::LoggerBuilder;

use crate::config::Config;
use crate::entry::{self, LogEntry, UNKNOWN_LOCATION};
use crate::internal;
use crate::paths::{PathResolver, SessionState};
use crate::sink::{Notify, Sink};
use chrono::Local;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Per-call notification triggers, each independent and best-effort.
#[derive(Debug, Clone, Copy, Default)]
pub struct Notifications {
    /// Chat-bot send of the entry's display text.
    pub telegram: bool,
    /// Webhook POST of the full entry to `log_notification_slack`.
    pub slack: bool,
    /// Webhook POST of the full entry to `log_notification_url`.
    pub webhook: bool,
}

/// The logging handle. Holds the config, the shared session state, and the
/// sinks; also carries the query methods (see the `query` module).
pub struct Logger {
    pub(crate) config: Arc<Config>,
    pub(crate) paths: PathResolver,
    state: Arc<Mutex<SessionState>>,
    /// Serializes whole `log()` calls: file appends and the last-timestamp
    /// update are shared mutable state needing one serialization point.
    call_lock: Mutex<()>,
    file_sink: Box<dyn Sink>,
    table_sink: Box<dyn Sink>,
    console_sink: Box<dyn Sink>,
    notifier: Box<dyn Notify>,
}

impl Logger {
    /// Direct construction would expose sink internals — the builder provides
    /// a guided API instead.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Logger backed by the config file at the default location; a missing
    /// file means defaults-only operation.
    ///
    /// # Errors
    /// Fails on unreadable or syntactically invalid TOML.
    pub fn load() -> Result<Self, crate::Error> {
        Ok(Self::builder().config(Config::load()?).build())
    }

    /// Records one message. Classification, elapsed-time computation, and
    /// fan-out to every enabled sink happen synchronously before returning.
    #[track_caller]
    pub fn log(&self, message: &str) {
        self.log_with(message, Notifications::default());
    }

    /// [`log`](Self::log) plus per-call notification triggers.
    #[track_caller]
    pub fn log_with(&self, message: &str, notify: Notifications) {
        // Master switch: disabled logging costs one config lookup and nothing else
        if !self.config.debug_mode() {
            return;
        }

        let code_location = caller_location();

        let _guard = self.call_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let log_type = entry::classify(message);
        let now = Local::now().naive_local();

        // Elapsed time is computed once against the previous call and reused
        // for every sink written during this call
        let processing_time = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let elapsed = state.last_time.map(|previous| {
                let delta = now.signed_duration_since(previous);
                delta.num_milliseconds().max(0) as f64 / 1000.0
            });
            state.last_time = Some(now);
            elapsed.map_or_else(|| "0".to_string(), |secs| secs.to_string())
        };

        let entry = LogEntry {
            process: entry::process_name().to_string(),
            timestamp: now.format("%Y%m%d%H%M%S").to_string(),
            log_type,
            message: message.to_string(),
            code_location,
            processing_time,
        };

        if self.config.enable_files() {
            report("FILE", self.file_sink.append(&entry));
        }
        if self.config.enable_terminal_output() {
            report("CONSOLE", self.console_sink.append(&entry));
        }
        if self.config.enable_database() {
            report("TABLE", self.table_sink.append(&entry));
        }

        if notify.telegram {
            report("NOTIFY", self.notifier.send_chat(&entry.to_string()));
        }
        if notify.slack
            && let Some(url) = self.config.notification_slack()
        {
            report("NOTIFY", self.notifier.post_webhook(&url, &entry));
        }
        if notify.webhook
            && let Some(url) = self.config.notification_url()
        {
            report("NOTIFY", self.notifier.post_webhook(&url, &entry));
        }
    }

    /// Active configuration — queries and embedders share the same view the
    /// dispatcher uses.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Clears the per-run path cache and the last-call timestamp.
    ///
    /// Intended for test harnesses; per-run files deliberately never rotate
    /// mid-process otherwise.
    pub fn reset_session(&self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reset();
    }
}

/// Best-effort policy in one place: failures become side-channel reports.
fn report(scope: &str, result: Result<(), crate::Error>) {
    if let Err(e) = result {
        internal::error(scope, &format!("Sink failure (continuing): {e}"));
    }
}

/// `#[track_caller]` propagates the original call site down to here; only the
/// file's base name is kept, matching the `<file>:<line>` contract.
#[track_caller]
fn caller_location() -> String {
    let location = std::panic::Location::caller();
    Path::new(location.file()).file_name().map_or_else(
        || UNKNOWN_LOCATION.to_string(),
        |name| format!("{}:{}", name.to_string_lossy(), location.line()),
    )
}
