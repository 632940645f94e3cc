//! Flat-file sink — delimiter-separated rows under the configured naming policy.

use super::Sink;
use crate::config::Config;
use crate::entry::LogEntry;
use crate::internal;
use crate::paths::PathResolver;
use crate::rowfmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::Arc;

/// Appends one row per entry; a new or empty file gets the header row first.
pub struct FileSink {
    config: Arc<Config>,
    paths: PathResolver,
}

impl FileSink {
    #[must_use]
    pub fn new(config: Arc<Config>, paths: PathResolver) -> Self {
        Self { config, paths }
    }
}

impl Sink for FileSink {
    fn append(&self, entry: &LogEntry) -> Result<(), crate::Error> {
        let path = self.paths.resolve();
        internal::trace("FILE", &format!("Writing to: {}", path.display()));

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            match fs::create_dir_all(parent) {
                Ok(()) => {
                    internal::debug("FILE", &format!("Created directory: {}", parent.display()));
                }
                Err(e) => {
                    internal::error(
                        "FILE",
                        &format!("Failed to create directory {}: {}", parent.display(), e),
                    );
                    return Err(e.into());
                }
            }
        }

        let delimiter = self.config.delimiter();
        let columns = self.config.columns();

        // Header belongs only at the top of a brand-new (or truncated) file
        let needs_header = fs::metadata(&path).map_or(true, |m| m.len() == 0);

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        // Header and row go out in one write so a concurrent reader never
        // sees a headerless, half-written file
        let mut content = String::new();
        if needs_header {
            content.push_str(&rowfmt::write_row(&columns, delimiter));
            content.push('\n');
        }
        content.push_str(&rowfmt::write_row(&entry.to_row(&columns), delimiter));
        content.push('\n');
        file.write_all(content.as_bytes())?;

        Ok(())
    }
}
