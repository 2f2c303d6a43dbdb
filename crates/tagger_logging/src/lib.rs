#![deny(missing_docs)]
//! Shared logging utilities for the tagger workspace.
//!
//! This crate provides the `tagger_*` logging macros used by the engine and
//! the frontend, plus a minimal test initializer for the global logger. The
//! pure wizard core never logs.

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! tagger_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! tagger_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! tagger_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! tagger_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! tagger_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Shortens a URL for log lines so long query strings do not flood the log.
///
/// Keeps the first `max_chars` characters and appends the number of
/// characters dropped.
pub fn clip_for_log(url: &str, max_chars: usize) -> String {
    let total = url.chars().count();
    if total <= max_chars {
        return url.to_string();
    }
    let kept: String = url.chars().take(max_chars).collect();
    format!("{kept}…(+{})", total - max_chars)
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may already own the global logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
