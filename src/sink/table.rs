//! `SQLite` sink — one text column per configured column name, write-only.

use super::Sink;
use crate::config::Config;
use crate::entry::LogEntry;
use crate::internal;
use rusqlite::{Connection, params_from_iter};
use std::fs;
use std::sync::Arc;

/// Inserts one row per entry into a `logs` table.
///
/// Opens, writes, and closes a connection per append. Logging is
/// low-frequency relative to request paths, and a fresh connection per write
/// avoids shared-connection-lifetime bugs entirely.
pub struct TableSink {
    config: Arc<Config>,
}

impl TableSink {
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Sink for TableSink {
    fn append(&self, entry: &LogEntry) -> Result<(), crate::Error> {
        // An empty store path disables the sink regardless of its toggle
        let Some(db_path) = self.config.sqlite_path() else {
            return Ok(());
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let columns = self.config.columns();
        let conn = Connection::open(&db_path)?;
        internal::trace("TABLE", &format!("Writing to: {}", db_path.display()));

        let schema = columns
            .iter()
            .map(|c| format!("{c} TEXT"))
            .collect::<Vec<_>>()
            .join(", ");
        conn.execute(&format!("CREATE TABLE IF NOT EXISTS logs ({schema});"), [])?;

        let placeholders = columns.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
        let insert = format!(
            "INSERT INTO logs ({}) VALUES ({placeholders});",
            columns.join(", ")
        );
        conn.execute(&insert, params_from_iter(entry.to_row(&columns)))?;

        Ok(())
    }
}
