//! Diagnostics setup plus a pair of switchable logging macros.
//!
//! Diagnostics go to a file by default so they never interleave with what the
//! participant is reading. Chatty modules gate their output behind a local
//! flag:
//! ```rust,ignore
//! const ENABLE_LOGS: bool = false;
//! use crate::log_info;
//!
//! log_info!("only printed while ENABLE_LOGS is true");
//! ```

use std::{fs::OpenOptions, path::Path};

use anyhow::{Context, Result};
use env_logger::{Env, Target};

/// Install the global logger. `RUST_LOG` overrides the `info` default.
///
/// With a path, records are appended to that file; without one they go to stderr.
pub fn init(diagnostics_path: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));

    if let Some(path) = diagnostics_path {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open diagnostics log {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .context("logger already initialised")
}

/// `log::info!` when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// `log::warn!` when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}
