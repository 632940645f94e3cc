//! The canonical record shape: one log call becomes one `LogEntry`, which is
//! serialized to a delimiter-separated row, an `SQLite` row, or a webhook
//! payload depending on the sink.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::{LazyLock, OnceLock};

/// Closed classification of a log message — derived from keyword matching,
/// never supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogType {
    /// Message contains an error keyword (failed, exception, missing, ...).
    Error,
    /// Message contains a caution keyword (warning, aware, careful).
    Warning,
    /// Everything else.
    #[default]
    Message,
}

impl LogType {
    /// Lowercase because rows and queries compare the string form directly.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown type" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLogTypeError(String);

impl fmt::Display for ParseLogTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log type: '{}'", self.0)
    }
}

impl std::error::Error for ParseLogTypeError {}

impl FromStr for LogType {
    type Err = ParseLogTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "message" => Ok(Self::Message),
            _ => Err(ParseLogTypeError(s.to_string())),
        }
    }
}

impl Serialize for LogType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Error keywords outrank warning keywords — a message matching both sets is an error.
static ERROR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(error|errors|exception|exceptions|failed|missing)\b")
        .expect("Invalid error regex")
});

static WARNING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(warning|aware|careful)\b").expect("Invalid warning regex"));

/// Whole-word, case-insensitive keyword classification. The error check runs
/// first, so a message matching both keyword sets classifies as an error.
#[must_use]
pub fn classify(message: &str) -> LogType {
    if ERROR_REGEX.is_match(message) {
        LogType::Error
    } else if WARNING_REGEX.is_match(message) {
        LogType::Warning
    } else {
        LogType::Message
    }
}

/// Short identity of the running process — the current executable's file stem.
///
/// Derived once and cached for the process lifetime; falls back to "unknown"
/// when the executable path cannot be determined.
pub fn process_name() -> &'static str {
    static NAME: OnceLock<String> = OnceLock::new();
    NAME.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "unknown".to_string())
    })
}

/// Sentinel for a call site the runtime could not identify.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// One log record. Transient — constructed per call, persisted only in its
/// serialized row form. `Serialize` backs the webhook payload.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Emitting process's short identity.
    pub process: String,
    /// Fixed-width `YYYYMMDDHHMMSS`, the moment of emission.
    pub timestamp: String,
    /// Keyword classification of the message.
    pub log_type: LogType,
    /// Arbitrary text; may contain delimiter/quote/newline characters.
    pub message: String,
    /// `"<file>:<line>"` of the call site, or [`UNKNOWN_LOCATION`].
    pub code_location: String,
    /// String-encoded seconds since the previous log call, `"0"` on the first.
    pub processing_time: String,
}

impl LogEntry {
    /// Positional lookup by column name — the file header and table schema
    /// both come from `log_columns`, so row order follows the configured
    /// names rather than struct field order.
    #[must_use]
    pub fn field(&self, column: &str) -> Option<&str> {
        match column {
            "process" => Some(&self.process),
            "timestamp" => Some(&self.timestamp),
            "log_type" => Some(self.log_type.as_str()),
            "message" => Some(&self.message),
            "code_location" => Some(&self.code_location),
            "processing_time" => Some(&self.processing_time),
            _ => None,
        }
    }

    /// Row form in the given column order. Unknown column names map to empty
    /// fields so a misconfigured `log_columns` still produces aligned rows.
    #[must_use]
    pub fn to_row(&self, columns: &[String]) -> Vec<String> {
        columns
            .iter()
            .map(|c| self.field(c).unwrap_or_default().to_string())
            .collect()
    }
}

/// Human-readable form used by the console sink and chat notifications.
impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} ({}) {} +{}s",
            self.timestamp,
            self.log_type,
            self.process,
            self.code_location,
            self.message,
            self.processing_time
        )
    }
}
