#![forbid(unsafe_code)]

//! `pagelog` - Process-local structured logging with paginated flat-file queries.
//!
//! A logging facility that records structured entries to rotating flat files
//! and/or an embedded `SQLite` store, supports paginated retrieval of
//! historical entries, and optionally forwards messages to notification
//! endpoints (Telegram bot, webhook POST):
//! - Keyword-based classification (error/warning/message)
//! - Daily or per-run file rotation with deterministic naming
//! - Page, line-range, and timestamp-window queries over dated files
//! - Best-effort sinks: persistence failures never reach the caller
//!
//! # Example
//!
//! ```no_run
//! use pagelog::{Logger, MapResolver};
//!
//! let logger = Logger::builder()
//!     .resolver(
//!         MapResolver::new()
//!             .with("log_enable_files", "true")
//!             .with("log_path", "logs"),
//!     )
//!     .build();
//!
//! logger.log("Application started");
//! logger.log("Connection failed: missing token"); // classified as error
//!
//! let pages = logger.total_pages(None).unwrap();
//! let first = logger.page(1).unwrap();
//! println!("{pages} pages, {} rows on page 1", first.len());
//! ```

pub mod config;
pub mod entry;
pub mod internal;
pub mod logger;
pub mod paths;
pub mod query;
pub mod rowfmt;
pub mod sink;

mod error;

// Re-exports for convenience
pub use config::{Config, FileNaming, MapResolver, NotConfigured, Resolver, TomlResolver};
pub use entry::{LogEntry, LogType, classify};
pub use error::Error;
pub use logger::{Logger, LoggerBuilder, Notifications};
pub use query::LogTable;
pub use sink::{ConsoleSink, FileSink, HttpNotifier, Notify, Sink, TableSink};
