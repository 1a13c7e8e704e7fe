//! Main logger implementation

use super::{
    config::Config,
    encoder::{Encoder, EncoderConfig},
    error::Result,
    field::Field,
    log_entry::{Caller, LogEntry},
    log_level::LogLevel,
    sink::Sink,
    sugar::SugaredLogger,
};
use crate::sinks::{select_sink, StdoutSink};
use parking_lot::Mutex;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// State shared by a logger and every handle derived from it.
struct LoggerCore {
    sink: Mutex<Box<dyn Sink>>,
    encoder: Encoder,
}

impl LoggerCore {
    /// Encode outside the lock, then write the whole line under it.
    ///
    /// **Per-sink panic isolation**: a panicking sink is reported and the
    /// record dropped; the caller never sees the failure.
    fn write(&self, entry: &LogEntry) {
        let line = self.encoder.encode(entry);
        let mut sink = self.sink.lock();

        let write_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            sink.write_record(line.as_bytes())
        }));

        match write_result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Sink '{}' write failed: {}", sink.name(), e);
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] Sink '{}' panicked: {}. Record dropped.",
                    sink.name(),
                    panic_message(panic_info.as_ref())
                );
            }
        }

        // Terminal levels must hit the disk before the process goes away
        if entry.level > LogLevel::Error {
            flush_or_report(&mut **sink);
        }
    }

    fn sync(&self) -> Result<()> {
        self.sink.lock().flush()
    }

    /// Like [`LoggerCore::sync`], for callers with nowhere to return an error.
    fn sync_or_report(&self) -> bool {
        flush_or_report(&mut **self.sink.lock())
    }
}

fn flush_or_report(sink: &mut dyn Sink) -> bool {
    match sink.flush() {
        Ok(()) => true,
        Err(e) => {
            eprintln!("[LOGGER ERROR] Sink '{}' flush failed: {}", sink.name(), e);
            false
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// A leveled logger writing to one sink.
///
/// Handles are cheap to clone and immutable; [`Logger::with_options`]
/// derives a new handle sharing the same sink.
///
/// # Example
///
/// ```
/// use xlog::{field, Config, Logger};
///
/// let logger = Logger::new(&Config::stdout("info"));
/// logger.info("server started", &[field::int("port", 8080)]);
/// logger.debug("not shown", &[]);
/// ```
#[derive(Clone)]
pub struct Logger {
    core: Arc<LoggerCore>,
    min_level: LogLevel,
    add_caller: bool,
    name: Option<String>,
    fields: Vec<Field>,
}

impl Logger {
    /// Build a logger from a configuration record.
    ///
    /// Never fails: an unknown level means `info`, and file problems show
    /// up later as dropped records reported on stderr.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let encoder = Encoder::new(config.encoding, EncoderConfig::iso8601());
        Self::from_parts(select_sink(config), encoder, config.min_level())
    }

    /// Build a logger over a caller-supplied sink.
    #[must_use]
    pub fn from_parts(sink: Box<dyn Sink>, encoder: Encoder, min_level: LogLevel) -> Self {
        Self {
            core: Arc::new(LoggerCore {
                sink: Mutex::new(sink),
                encoder,
            }),
            min_level,
            add_caller: true,
            name: None,
            fields: Vec::new(),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use xlog::{LogLevel, Logger};
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Warn)
    ///     .name("db")
    ///     .build();
    /// assert!(!logger.enabled(LogLevel::Info));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Derive a new handle with extra options; `self` is unchanged.
    #[must_use]
    pub fn with_options(&self, options: LoggerOptions) -> Logger {
        let mut derived = self.clone();
        options.apply(&mut derived);
        derived
    }

    /// The variadic / format / key-value companion over the same state.
    #[must_use]
    pub fn sugar(&self) -> SugaredLogger {
        SugaredLogger::new(self.clone())
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn level(&self) -> LogLevel {
        self.min_level
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn encoder(&self) -> &Encoder {
        &self.core.encoder
    }

    /// Flush the underlying sink.
    pub fn sync(&self) -> Result<()> {
        self.core.sync()
    }

    /// Whether a call at `level` needs its message built at all.
    #[inline]
    pub(crate) fn needs_message(&self, level: LogLevel) -> bool {
        self.enabled(level) || level.terminates()
    }

    /// Write a record (if enabled) and apply the level's terminal behavior.
    ///
    /// `Panic` and `Fatal` terminate even when the record itself is
    /// filtered out.
    #[track_caller]
    pub(crate) fn emit(&self, level: LogLevel, message: String, fields: Vec<Field>) {
        let location = Location::caller();

        if self.enabled(level) {
            let mut all = Vec::with_capacity(self.fields.len() + fields.len());
            all.extend(self.fields.iter().cloned());
            all.extend(fields);

            let mut entry = LogEntry::new(level, &message)
                .with_name(self.name.as_deref())
                .with_fields(all);
            if self.add_caller {
                entry = entry.with_caller(Caller::from_location(location));
            }
            self.core.write(&entry);
        }

        match level {
            LogLevel::Panic => panic!("{}", message),
            LogLevel::Fatal => {
                self.core.sync_or_report();
                std::process::exit(1);
            }
            _ => {}
        }
    }

    /// Log a message with strongly-typed fields.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: &str, fields: &[Field]) {
        if !self.needs_message(level) {
            return;
        }
        self.emit(level, message.to_string(), fields.to_vec());
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Debug, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Info, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Warn, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Error, message, fields);
    }

    /// Log, then panic with the message.
    #[inline]
    #[track_caller]
    pub fn panic(&self, message: &str, fields: &[Field]) {
        self.log(LogLevel::Panic, message, fields);
    }

    /// Log, flush, then exit the process with status 1.
    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: &str, fields: &[Field]) -> ! {
        self.log(LogLevel::Fatal, message, fields);
        unreachable!("fatal logging exits the process")
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("sink", &self.core.sink.lock().name())
            .field("encoding", &self.core.encoder.encoding())
            .field("min_level", &self.min_level)
            .field("add_caller", &self.add_caller)
            .field("name", &self.name)
            .field("fields", &self.fields.len())
            .finish()
    }
}

impl Default for Logger {
    /// Debug level to standard output, the process-wide starting point.
    fn default() -> Self {
        Logger::new(&Config::stdout("debug"))
    }
}

/// Options applied by [`Logger::with_options`].
///
/// # Example
///
/// ```
/// use xlog::{field, Config, LogLevel, Logger, LoggerOptions};
///
/// let base = Logger::new(&Config::stdout("debug"));
/// let db = base.with_options(
///     LoggerOptions::new()
///         .named("db")
///         .fields(vec![field::string("shard", "eu-1")])
///         .increase_level(LogLevel::Warn),
/// );
/// assert_eq!(db.name(), Some("db"));
/// assert!(!db.enabled(LogLevel::Info));
/// assert!(base.enabled(LogLevel::Debug));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggerOptions {
    caller: Option<bool>,
    name: Option<String>,
    fields: Vec<Field>,
    increase_level: Option<LogLevel>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the `file:line` annotation on or off.
    #[must_use = "builder methods return a new value"]
    pub fn caller(mut self, enabled: bool) -> Self {
        self.caller = Some(enabled);
        self
    }

    /// Append a name segment; names nest as `parent.child`.
    #[must_use = "builder methods return a new value"]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Fields added to every record of the derived logger.
    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: Vec<Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Raise the minimum level. Lowering it is refused.
    #[must_use = "builder methods return a new value"]
    pub fn increase_level(mut self, level: LogLevel) -> Self {
        self.increase_level = Some(level);
        self
    }

    fn apply(self, logger: &mut Logger) {
        if let Some(enabled) = self.caller {
            logger.add_caller = enabled;
        }
        if let Some(name) = self.name.filter(|n| !n.is_empty()) {
            logger.name = Some(match logger.name.take() {
                Some(parent) => format!("{}.{}", parent, name),
                None => name,
            });
        }
        logger.fields.extend(self.fields);
        if let Some(level) = self.increase_level {
            if level < logger.min_level {
                eprintln!(
                    "[LOGGER WARNING] Cannot lower minimum level from {} to {}; keeping {}",
                    logger.min_level, level, logger.min_level
                );
            } else {
                logger.min_level = level;
            }
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Defaults: standard output, console encoding with ISO 8601 timestamps,
/// `info` minimum level, caller annotation on.
pub struct LoggerBuilder {
    min_level: LogLevel,
    sink: Option<Box<dyn Sink>>,
    encoder: Encoder,
    options: LoggerOptions,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            sink: None,
            encoder: Encoder::default(),
            options: LoggerOptions::default(),
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn encoder(mut self, encoder: Encoder) -> Self {
        self.encoder = encoder;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller(mut self, enabled: bool) -> Self {
        self.options = self.options.caller(enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.named(name);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let sink = self.sink.unwrap_or_else(|| Box::new(StdoutSink::new()));
        let logger = Logger::from_parts(sink, self.encoder, self.min_level);
        logger.with_options(self.options)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
