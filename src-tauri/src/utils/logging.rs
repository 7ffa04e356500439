//! Logger setup plus per-module switchable logging macros.
//!
//! A module opts in by declaring the flag the macros read:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_debug, log_info};
//!
//! log_info!("interval committed at index {}", index);
//! ```
//! Flipping the flag to `false` silences that module without touching `RUST_LOG`.

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs `env_logger` once. `RUST_LOG` wins over the defaults; without it
/// the crate logs at `info`, or `debug` when `verbose` is set.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let level = if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };

        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Warn);
        builder.filter_module("tagtimer_lib", level);
        builder.filter_module("tagtimer", level);
        builder.parse_default_env();

        if let Err(err) = builder.try_init() {
            eprintln!("logger already installed: {err}");
        }
    });
}

/// Info log gated by the calling module's `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Warn log gated by the calling module's `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Error log gated by the calling module's `ENABLE_LOGS`.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}

/// Debug log gated by the calling module's `ENABLE_LOGS`. Used on hot
/// paths such as the per-second tick.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}
