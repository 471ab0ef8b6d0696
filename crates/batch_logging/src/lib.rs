#![deny(missing_docs)]
//! Shared logging utilities for the OCR batch workspace.
//!
//! This crate provides the `batch_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Messages logged from
//! a thread that has a current file set are prefixed with `[file i/total]`.

use std::cell::Cell;

/// Re-exports used by macro expansions.
#[doc(hidden)]
pub mod __private {
    pub use log;
}

thread_local! {
    /// The file the current thread is working on, as `(index, total)`.
    static CURRENT_FILE: Cell<Option<(usize, usize)>> = const { Cell::new(None) };
}

/// Marks the file the current thread is working on.
/// Pass `None` once the thread leaves the per-file loop.
pub fn set_current_file(file: Option<(usize, usize)>) {
    CURRENT_FILE.with(|v| v.set(file));
}

/// Returns the file set by [`set_current_file`] on this thread, if any.
pub fn current_file() -> Option<(usize, usize)> {
    CURRENT_FILE.with(|v| v.get())
}

/// Prefix prepended by the `batch_*` macros. Empty outside a file context.
pub fn context_prefix() -> String {
    match current_file() {
        Some((index, total)) => format!("[file {index}/{total}] "),
        None => String::new(),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! batch_trace {
    ($($arg:tt)*) => {{
        $crate::__private::log::trace!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! batch_info {
    ($($arg:tt)*) => {{
        $crate::__private::log::info!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! batch_debug {
    ($($arg:tt)*) => {{
        $crate::__private::log::debug!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! batch_warn {
    ($($arg:tt)*) => {{
        $crate::__private::log::warn!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! batch_error {
    ($($arg:tt)*) => {{
        $crate::__private::log::error!("{}{}", $crate::context_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test in the same binary may have won the race.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}
