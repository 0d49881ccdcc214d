//! Logging utilities for CLI output

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Log level for CLI output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output except errors
    Quiet,
    /// Normal output level; advisories are shown
    Normal,
    /// Verbose output with lookup details
    Verbose,
}

impl LogLevel {
    /// Derive the level from the global flags
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    /// Most verbose tracing level emitted at this log level
    pub fn tracing_level(self) -> Level {
        match self {
            LogLevel::Quiet => Level::ERROR,
            LogLevel::Normal => Level::WARN,
            LogLevel::Verbose => Level::DEBUG,
        }
    }
}

/// Filter for `level`, overridden by `directives` (the `RUST_LOG` syntax) when they parse
pub fn env_filter(level: LogLevel, directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(LevelFilter::from_level(level.tracing_level()).into()))
}

/// Install a stderr subscriber for `level`; a no-op if one is already set
pub fn init_tracing(level: LogLevel) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level, directives.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}
