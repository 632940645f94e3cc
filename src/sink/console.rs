//! Console sink — the entry's display line on stdout.

use super::Sink;
use crate::entry::LogEntry;
use std::io::Write;

/// Prints entries to stdout. A failed write retries with non-ASCII
/// characters escaped rather than surfacing an error — console trouble
/// must never look like a logging failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn append(&self, entry: &LogEntry) -> Result<(), crate::Error> {
        let line = entry.to_string();
        let mut stdout = std::io::stdout().lock();
        if writeln!(stdout, "{line}").is_err() {
            let degraded: String = line
                .chars()
                .map(|c| {
                    if c.is_ascii() {
                        c.to_string()
                    } else {
                        c.escape_unicode().to_string()
                    }
                })
                .collect();
            let _ = writeln!(stdout, "{degraded}");
        }
        Ok(())
    }
}
