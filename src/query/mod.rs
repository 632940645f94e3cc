//! Paginated, ranged, and timestamp-windowed retrieval over the flat-file
//! sink. Queries reconstruct structured rows from the same on-disk format the
//! append engine writes; the relational store is write-only and has no read
//! API here.

use crate::internal;
use crate::logger::Logger;
use crate::rowfmt;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::Path;

/// Query result: rows plus the column names they were resolved against.
///
/// `columns` is `None` only for [`Logger::logs_in_range`] on a headerless
/// file, where no names can be trusted — callers must handle their absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTable {
    /// Column names, in on-disk order.
    pub columns: Option<Vec<String>>,
    /// One entry per row, fields in column order.
    pub rows: Vec<Vec<String>>,
}

impl LogTable {
    #[must_use]
    pub fn empty(columns: Option<Vec<String>>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a named column, when column names are known.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .as_ref()
            .and_then(|cols| cols.iter().position(|c| c == name))
    }
}

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

impl Logger {
    /// One page of today's (or the per-run) log file, 1-indexed.
    ///
    /// # Errors
    /// `NotFound` when the file is absent. `InvalidArgument` when `page_num`
    /// lies outside `[1, total_pages]` — an empty file has zero pages, so
    /// every page number is invalid for it.
    pub fn page(&self, page_num: usize) -> Result<LogTable, crate::Error> {
        let path = self.paths.resolve();
        if !path.exists() {
            return Err(crate::Error::NotFound(path));
        }

        let mut rows = self.load_rows(&path)?;
        let columns = self.config.columns();
        let headers = if rows.first().is_some_and(|first| *first == columns) {
            rows.remove(0)
        } else {
            columns
        };

        let page_size = self.config.page_size();
        let total = rows.len();
        let pages = total.div_ceil(page_size);
        if page_num < 1 || page_num > pages {
            return Err(crate::Error::InvalidArgument(format!(
                "invalid page number: {page_num}; total pages available: {pages}"
            )));
        }

        let start = (page_num - 1) * page_size;
        let end = (start + page_size).min(total);
        Ok(LogTable {
            columns: Some(headers),
            rows: rows[start..end].to_vec(),
        })
    }

    /// Rows `[start_line, end_line]` (1-based, inclusive) of a dated file.
    ///
    /// `date` is in `YYYY_MM_DD` form. Column names are `None` when the file
    /// carries no header row.
    ///
    /// # Errors
    /// `NotFound` when the file is absent; `InvalidArgument` when the range
    /// is out of bounds or inverted.
    pub fn logs_in_range(
        &self,
        date: &str,
        start_line: usize,
        end_line: usize,
    ) -> Result<LogTable, crate::Error> {
        let path = self.paths.dated(date);
        if !path.exists() {
            return Err(crate::Error::NotFound(path));
        }

        let mut rows = self.load_rows(&path)?;
        let columns = self.config.columns();
        let headers = if rows.first().is_some_and(|first| *first == columns) {
            Some(rows.remove(0))
        } else {
            None
        };

        if start_line < 1 || end_line > rows.len() || start_line > end_line {
            return Err(crate::Error::InvalidArgument(format!(
                "invalid range: start_line={start_line}, end_line={end_line}, total_lines={}",
                rows.len()
            )));
        }

        Ok(LogTable {
            columns: headers,
            rows: rows[start_line - 1..end_line].to_vec(),
        })
    }

    /// Total page count of a dated file, or of today's file when `date` is
    /// omitted.
    ///
    /// # Errors
    /// Today's file is expected to exist — its absence is `NoLogsAvailable`.
    /// A historical date may legitimately have no file yet, so that case
    /// returns `Ok(0)` instead of failing.
    pub fn total_pages(&self, date: Option<&str>) -> Result<usize, crate::Error> {
        let (path, is_today) = match date {
            None => (self.paths.resolve(), true),
            Some(d) => (self.paths.dated(d), false),
        };

        if !path.exists() {
            if is_today {
                return Err(crate::Error::NoLogsAvailable);
            }
            return Ok(0);
        }

        let mut rows = self.load_rows(&path)?;
        let columns = self.config.columns();
        if rows.first().is_some_and(|first| *first == columns) {
            rows.remove(0);
        }

        Ok(rows.len().div_ceil(self.config.page_size()))
    }

    /// All rows of the file for a compact `YYYYMMDD` date.
    ///
    /// The header is detected by exact match of the raw first line against
    /// the delimiter-joined column names; headerless files fall back to the
    /// configured `log_columns` as names.
    ///
    /// # Errors
    /// `InvalidArgument` unless `date` is exactly eight ASCII digits;
    /// `NotFound` when the file is absent.
    pub fn logs_from_date(&self, date: &str) -> Result<LogTable, crate::Error> {
        if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
            return Err(crate::Error::InvalidArgument(format!(
                "date must be in YYYYMMDD format, e.g. 20240110: '{date}'"
            )));
        }

        let formatted = format!("{}_{}_{}", &date[..4], &date[4..6], &date[6..]);
        let path = self.paths.dated(&formatted);
        if !path.exists() {
            return Err(crate::Error::NotFound(path));
        }

        let content = fs::read_to_string(&path)?;
        let delimiter = self.config.delimiter();
        let columns = self.config.columns();

        let joined_header = columns.join(&delimiter.to_string());
        let has_header = content
            .lines()
            .next()
            .is_some_and(|first| first == joined_header);

        let mut rows = rowfmt::parse_rows(&content, delimiter);
        if has_header && !rows.is_empty() {
            rows.remove(0);
        }

        Ok(LogTable {
            columns: Some(columns),
            rows,
        })
    }

    /// All entries whose timestamp lies in `[t1, t2]` inclusive, across every
    /// dated file in the window.
    ///
    /// Missing files for intermediate dates are skipped; a window with no
    /// data at all yields an empty table rather than an error. Row order is
    /// date-file order, then within-file order.
    ///
    /// # Errors
    /// `InvalidArgument` on unparseable `YYYYMMDDHHMMSS` timestamps or when
    /// `t1 > t2`.
    pub fn logs_between(&self, t1: &str, t2: &str) -> Result<LogTable, crate::Error> {
        let dt1 = parse_timestamp(t1)?;
        let dt2 = parse_timestamp(t2)?;
        if dt1 > dt2 {
            return Err(crate::Error::InvalidArgument(format!(
                "start timestamp {t1} must not exceed end timestamp {t2}"
            )));
        }

        let columns = self.config.columns();
        let Some(ts_index) = columns.iter().position(|c| c == "timestamp") else {
            internal::warn("QUERY", "No timestamp column configured; returning empty window");
            return Ok(LogTable::empty(Some(columns)));
        };

        let mut rows = Vec::new();
        for date in date_range(dt1.date(), dt2.date()) {
            let compact = date.format("%Y%m%d").to_string();
            match self.logs_from_date(&compact) {
                Ok(table) => rows.extend(table.rows),
                Err(crate::Error::NotFound(_)) => {
                    internal::debug("QUERY", &format!("No log file for {compact}; skipping"));
                }
                Err(e) => {
                    internal::warn("QUERY", &format!("Failed to read logs for {compact}: {e}"));
                }
            }
        }

        let filtered = rows
            .into_iter()
            .filter(|row| {
                row.get(ts_index)
                    .and_then(|ts| NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok())
                    .is_some_and(|ts| ts >= dt1 && ts <= dt2)
            })
            .collect();

        Ok(LogTable {
            columns: Some(columns),
            rows: filtered,
        })
    }

    fn load_rows(&self, path: &Path) -> Result<Vec<Vec<String>>, crate::Error> {
        let content = fs::read_to_string(path)?;
        Ok(rowfmt::parse_rows(&content, self.config.delimiter()))
    }
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, crate::Error> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| {
        crate::Error::InvalidArgument(format!(
            "timestamps must be in YYYYMMDDHHMMSS format: '{value}'"
        ))
    })
}

/// Every calendar date from `start` to `end` inclusive.
fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), move |d| {
        d.succ_opt().filter(|next| *next <= end)
    })
}
