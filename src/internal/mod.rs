//! Pagelog's own side channel — sink and notification failures must be
//! reported somewhere without ever propagating to the host application,
//! and without re-entering the logger that just failed.
//!
//! Writes to stderr. Warnings and errors are always emitted; debug and trace
//! messages appear only when `PAGELOG_DEBUG` is set in the environment.

use std::sync::OnceLock;

fn debug_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var_os("PAGELOG_DEBUG").is_some())
}

fn emit(level: &str, scope: &str, msg: &str) {
    eprintln!("[pagelog {level}] {scope}: {msg}");
}

/// High-volume instrumentation (resolved paths, per-write details) — env-gated.
pub fn trace(scope: &str, msg: &str) {
    if debug_enabled() {
        emit("trace", scope, msg);
    }
}

/// Startup and state-change diagnostics — env-gated.
pub fn debug(scope: &str, msg: &str) {
    if debug_enabled() {
        emit("debug", scope, msg);
    }
}

/// Non-fatal anomalies — missing intermediate files, skipped rows.
pub fn warn(scope: &str, msg: &str) {
    emit("warn", scope, msg);
}

/// Swallowed sink failures — the call proceeds, but the failure is visible here.
pub fn error(scope: &str, msg: &str) {
    emit("error", scope, msg);
}
