//! Unified error type for all pagelog operations.

use std::path::PathBuf;

/// Error type for pagelog operations.
#[derive(Debug)]
pub enum Error {
    /// A dated log file that was asked for does not exist.
    NotFound(PathBuf),
    /// Bad page number, line range, date, or timestamp input.
    InvalidArgument(String),
    /// Today's log file is missing where one is required.
    NoLogsAvailable,
    /// I/O error.
    Io(std::io::Error),
    /// `SQLite` store error.
    Sqlite(rusqlite::Error),
    /// Notification transport error.
    Http(reqwest::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Format/serialization error.
    Format(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(p) => write!(f, "log file not found: {}", p.display()),
            Self::InvalidArgument(s) => write!(f, "invalid argument: {s}"),
            Self::NoLogsAvailable => write!(f, "no logs available"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Sqlite(e) => write!(f, "sqlite error: {e}"),
            Self::Http(e) => write!(f, "http error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::Format(s) => write!(f, "format error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Sqlite(e) => Some(e),
            Self::Http(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Self::Sqlite(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e.to_string())
    }
}
