//! Persistence and notification targets for log entries.
//!
//! The built-in sinks (file, table, console) can't cover every deployment —
//! the `Sink` trait lets embedders inject their own backends, and tests
//! substitute fakes without touching the dispatch core.

mod console;
mod file;
mod notify;
mod table;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use notify::{HttpNotifier, Notify};
pub use table::TableSink;

use crate::entry::LogEntry;

/// `Send + Sync` bounds let one logger handle be shared across threads.
pub trait Sink: Send + Sync {
    /// Persists one entry. Each backend serializes the record its own way
    /// (delimited row, `SQLite` row, display line).
    ///
    /// # Errors
    /// I/O or store errors from the underlying backend. The dispatcher
    /// reports these to the side channel and continues with other sinks.
    fn append(&self, entry: &LogEntry) -> Result<(), crate::Error>;
}
