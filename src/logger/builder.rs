//! Stepwise construction of a [`Logger`] — wires the config, session state,
//! default sinks, and notifier, with injection points for tests and embedders.

use super::Logger;
use crate::config::{Config, Resolver};
use crate::paths::{PathResolver, SessionState};
use crate::sink::{ConsoleSink, FileSink, HttpNotifier, Notify, Sink, TableSink};
use std::sync::{Arc, Mutex};

/// Direct Logger construction would expose sink internals to every caller.
#[derive(Default)]
pub struct LoggerBuilder {
    config: Option<Arc<Config>>,
    resolver: Option<Box<dyn Resolver>>,
    file_sink: Option<Box<dyn Sink>>,
    table_sink: Option<Box<dyn Sink>>,
    console_sink: Option<Box<dyn Sink>>,
    notifier: Option<Box<dyn Notify>>,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an already-built configuration; takes precedence over `resolver`.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(Arc::new(config));
        self
    }

    /// Wraps a custom key→value source in the standard fallback/pinning adapter.
    #[must_use]
    pub fn resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Replaces the flat-file backend — tests substitute fakes here.
    #[must_use]
    pub fn file_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.file_sink = Some(Box::new(sink));
        self
    }

    /// Replaces the relational store backend.
    #[must_use]
    pub fn table_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.table_sink = Some(Box::new(sink));
        self
    }

    /// Replaces the console backend.
    #[must_use]
    pub fn console_sink(mut self, sink: impl Sink + 'static) -> Self {
        self.console_sink = Some(Box::new(sink));
        self
    }

    /// Replaces the notification transport — tests record fan-out with a fake.
    #[must_use]
    pub fn notifier(mut self, notifier: impl Notify + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Builds the logger. Without an explicit config or resolver, the default
    /// config file location is used; a missing or broken file means
    /// defaults-only operation.
    #[must_use]
    pub fn build(self) -> Logger {
        let config = self.config.unwrap_or_else(|| {
            Arc::new(self.resolver.map_or_else(
                || Config::load().unwrap_or_else(|_| Config::defaults()),
                Config::new,
            ))
        });

        let state = Arc::new(Mutex::new(SessionState::new()));
        let paths = PathResolver::new(Arc::clone(&config), Arc::clone(&state));

        let file_sink = self
            .file_sink
            .unwrap_or_else(|| Box::new(FileSink::new(Arc::clone(&config), paths.clone())));
        let table_sink = self
            .table_sink
            .unwrap_or_else(|| Box::new(TableSink::new(Arc::clone(&config))));
        let console_sink = self
            .console_sink
            .unwrap_or_else(|| Box::new(ConsoleSink::new()));
        let notifier = self
            .notifier
            .unwrap_or_else(|| Box::new(HttpNotifier::new(Arc::clone(&config))));

        Logger {
            config,
            paths,
            state,
            call_lock: Mutex::new(()),
            file_sink,
            table_sink,
            console_sink,
            notifier,
        }
    }
}
