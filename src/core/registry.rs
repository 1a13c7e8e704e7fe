//! Process-wide default logger
//!
//! Holds one strongly-typed logger and its sugared companion behind a
//! single atomic pointer, so readers always see a matching pair and never
//! block. Until [`init`] or [`set_default`] runs, the default logs at
//! `debug` level to standard output.

use super::config::Config;
use super::error::Result;
use super::logger::{Logger, LoggerOptions};
use super::sugar::SugaredLogger;
use arc_swap::{ArcSwap, Guard};
use std::sync::{Arc, LazyLock};

pub(crate) struct Defaults {
    pub(crate) logger: Logger,
    pub(crate) sugared: SugaredLogger,
}

impl Defaults {
    fn from_logger(logger: Logger) -> Self {
        let sugared = logger.sugar();
        Self { logger, sugared }
    }
}

static DEFAULTS: LazyLock<ArcSwap<Defaults>> =
    LazyLock::new(|| ArcSwap::from_pointee(Defaults::from_logger(Logger::default())));

/// Current defaults; cheap and lock-free.
pub(crate) fn current() -> Guard<Arc<Defaults>> {
    DEFAULTS.load()
}

/// Build a logger from `config`, install it as the process default, and
/// return it.
///
/// Calls racing with logging are safe: each record goes to either the old
/// or the new logger, never a mix.
///
/// # Example
///
/// ```
/// use xlog::Config;
///
/// let logger = xlog::init(&Config::stdout("warn"));
/// assert_eq!(logger.level(), xlog::LogLevel::Warn);
/// ```
pub fn init(config: &Config) -> Logger {
    let logger = Logger::new(config);
    set_default(logger.clone());
    logger
}

/// Install an already-built logger as the process default.
pub fn set_default(logger: Logger) {
    let previous = DEFAULTS.swap(Arc::new(Defaults::from_logger(logger)));
    if let Err(e) = previous.logger.sync() {
        eprintln!("[LOGGER ERROR] Failed to flush replaced default logger: {}", e);
    }
}

/// Derive a logger from the current default; the default itself is unchanged.
pub fn with_options(options: LoggerOptions) -> Logger {
    current().logger.with_options(options)
}

/// A handle to the current default logger.
pub fn default_logger() -> Logger {
    current().logger.clone()
}

/// A handle to the current default sugared logger.
pub fn default_sugared() -> SugaredLogger {
    current().sugared.clone()
}

/// Flush the default logger's sink.
pub fn sync() -> Result<()> {
    current().logger.sync()
}
