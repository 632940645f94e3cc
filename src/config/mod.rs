//! Configuration lookup with case fallback, static defaults, and
//! pin-to-defaults behavior when the backing source is missing.
//!
//! Separated from the resolvers so the fallback policy (case flip, defaults,
//! pinning) stays independent of where values actually come from.

mod resolver;

pub use resolver::{MapResolver, NotConfigured, Resolver, TomlResolver};

use crate::internal;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Default column order, shared by the file header and the table schema.
pub const DEFAULT_COLUMNS: [&str; 6] = [
    "timestamp",
    "log_type",
    "process",
    "code_location",
    "message",
    "processing_time",
];

const DEFAULT_SQLITE_PATH: &str = "logs/pagelog.sqlite3";
const DEFAULT_LOG_PATH: &str = "logs";
const DEFAULT_PREFIX: &str = "pagelog";
const DEFAULT_DELIMITER: char = ',';
const DEFAULT_PAGE_SIZE: usize = 100;
const DEFAULT_CONVENTION: &str = "YYYY_MM_DD_HH_MM_SS-[process]-log.log";

/// File rotation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileNaming {
    /// One file per calendar date.
    #[default]
    Daily,
    /// One file for the entire process lifetime, named once on first use.
    PerRun,
}

/// Resolver adapter implementing the lookup precedence: explicit value (as
/// given, then case-flipped) → static default.
///
/// When the resolver reports [`NotConfigured`], defaults are pinned for the
/// rest of the process lifetime so the missing source isn't probed on every
/// log call.
pub struct Config {
    resolver: Box<dyn Resolver>,
    pinned: AtomicBool,
}

impl Config {
    #[must_use]
    pub fn new(resolver: Box<dyn Resolver>) -> Self {
        Self {
            resolver,
            pinned: AtomicBool::new(false),
        }
    }

    /// Defaults-only configuration — behaves as if the source never existed.
    #[must_use]
    pub fn defaults() -> Self {
        let config = Self::new(Box::new(MapResolver::new()));
        config.pinned.store(true, Ordering::Relaxed);
        config
    }

    /// Loads the TOML resolver from the platform config directory
    /// (`<config>/pagelog/pagelog.toml`). A missing file is fine — lookups
    /// then pin to defaults.
    ///
    /// # Errors
    /// Fails on unreadable or syntactically invalid TOML.
    pub fn load() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        Ok(Self::new(Box::new(TomlResolver::load(&path)?)))
    }

    /// Loads configuration from an explicit path instead of the default location.
    ///
    /// # Errors
    /// Fails on unreadable or syntactically invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        Ok(Self::new(Box::new(TomlResolver::load(path)?)))
    }

    /// XDG-compliant default location for the flat `key = value` config file.
    #[must_use]
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new().map_or_else(
            || PathBuf::from("pagelog.toml"),
            |dirs| dirs.config_dir().join("pagelog").join("pagelog.toml"),
        )
    }

    /// Raw lookup with case fallback. `None` means "use the default".
    fn raw(&self, key: &str) -> Option<String> {
        if self.pinned.load(Ordering::Relaxed) {
            return None;
        }
        match self.lookup_with_case_fallback(key) {
            Ok(value) => value,
            Err(NotConfigured) => {
                internal::warn(
                    "CONFIG",
                    "Configuration source missing; pinning defaults for this process",
                );
                self.pinned.store(true, Ordering::Relaxed);
                None
            }
        }
    }

    fn lookup_with_case_fallback(&self, key: &str) -> Result<Option<String>, NotConfigured> {
        if let Some(value) = self.resolver.get(key)? {
            return Ok(Some(value));
        }
        let alternate = if key == key.to_lowercase() {
            key.to_uppercase()
        } else {
            key.to_lowercase()
        };
        self.resolver.get(&alternate)
    }

    /// Master switch — when false, `log()` is a no-op.
    #[must_use]
    pub fn debug_mode(&self) -> bool {
        self.bool_key("log_debug_mode", true)
    }

    #[must_use]
    pub fn enable_files(&self) -> bool {
        self.bool_key("log_enable_files", false)
    }

    #[must_use]
    pub fn enable_terminal_output(&self) -> bool {
        self.bool_key("log_enable_terminal_output", true)
    }

    #[must_use]
    pub fn enable_database(&self) -> bool {
        self.bool_key("log_enable_database", false)
    }

    /// Store location; `None` when configured empty, which disables the sink
    /// regardless of its toggle.
    #[must_use]
    pub fn sqlite_path(&self) -> Option<PathBuf> {
        let raw = self
            .raw("log_sqlite3_path")
            .unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string());
        if raw.is_empty() {
            return None;
        }
        Some(expand_path(&raw))
    }

    /// Canonical column order, shared by the file header and table schema.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        self.raw("log_columns").map_or_else(
            || DEFAULT_COLUMNS.iter().map(ToString::to_string).collect(),
            |raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            },
        )
    }

    /// Base directory for flat-file sinks, tilde-expanded.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        let raw = self
            .raw("log_path")
            .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string());
        expand_path(&raw)
    }

    #[must_use]
    pub fn prefix(&self) -> String {
        self.raw("log_prefix")
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string())
    }

    /// Field separator for flat-file rows. A multi-character value falls back
    /// to its first character.
    #[must_use]
    pub fn delimiter(&self) -> char {
        self.raw("log_delimiter")
            .and_then(|s| s.chars().next())
            .unwrap_or(DEFAULT_DELIMITER)
    }

    /// Rows per page for paginated queries; non-positive or unparseable
    /// values fall back to the default.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.raw("log_page_size")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    #[must_use]
    pub fn notification_slack(&self) -> Option<String> {
        self.raw("log_notification_slack").filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn notification_url(&self) -> Option<String> {
        self.raw("log_notification_url").filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn telegram_bot_token(&self) -> Option<String> {
        self.raw("log_notification_telegram_bot_token")
            .filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn telegram_chat_id(&self) -> Option<String> {
        self.raw("log_notification_telegram_chat_id")
            .filter(|s| !s.is_empty())
    }

    /// Rotation policy; anything other than `per_run` means daily.
    #[must_use]
    pub fn file_naming(&self) -> FileNaming {
        match self
            .raw("log_file_naming")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "per_run" => FileNaming::PerRun,
            _ => FileNaming::Daily,
        }
    }

    /// Filename template used only under per-run naming.
    #[must_use]
    pub fn file_name_convention(&self) -> String {
        self.raw("log_file_name_convention")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CONVENTION.to_string())
    }

    fn bool_key(&self, key: &str, default: bool) -> bool {
        self.raw(key)
            .and_then(|v| normalize_bool(&v))
            .unwrap_or(default)
    }
}

/// Accepts the boolean spellings config files actually contain:
/// true/false, 1/0, yes/no, on/off (case-insensitive).
#[must_use]
pub fn normalize_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Config values use `~` for portability — the OS needs an absolute path.
fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}
