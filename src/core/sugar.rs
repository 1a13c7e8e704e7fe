//! Loosely-typed companion to [`Logger`]
//!
//! Three call styles per level:
//! - variadic (`info`): arguments rendered with `Display` and joined by spaces
//! - format (`infof`): a pre-built `format_args!` template
//! - key/value (`infow`): a message plus alternating keys and values
//!
//! Arguments are only rendered once the level is known to be enabled.

use super::field::{Field, FieldValue};
use super::log_level::LogLevel;
use super::logger::Logger;
use std::fmt::{self, Display, Write as _};

/// Field key recorded when a key/value list ends with a key and no value.
pub const IGNORED_KEY: &str = "ignored";

/// Field key recorded for pairs whose key is not a string.
pub const INVALID_KEY: &str = "invalid";

#[derive(Debug, Clone)]
pub struct SugaredLogger {
    base: Logger,
}

impl SugaredLogger {
    pub(crate) fn new(base: Logger) -> Self {
        Self { base }
    }

    /// The strongly-typed logger underneath.
    pub fn desugar(&self) -> &Logger {
        &self.base
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.base.enabled(level)
    }

    /// Log the space-joined `Display` rendering of `args`.
    #[track_caller]
    pub fn log(&self, level: LogLevel, args: &[&dyn Display]) {
        if !self.base.needs_message(level) {
            return;
        }
        self.base.emit(level, join_args(args), Vec::new());
    }

    /// Log a formatted message.
    #[track_caller]
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.base.needs_message(level) {
            return;
        }
        let message = match args.as_str() {
            Some(literal) => literal.to_string(),
            None => fmt::format(args),
        };
        self.base.emit(level, message, Vec::new());
    }

    /// Log a message with alternating keys and values.
    #[track_caller]
    pub fn logw(&self, level: LogLevel, message: &str, keys_and_values: &[FieldValue]) {
        if !self.base.needs_message(level) {
            return;
        }
        self.base
            .emit(level, message.to_string(), sweeten(keys_and_values));
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, args: &[&dyn Display]) {
        self.log(LogLevel::Debug, args);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, args: &[&dyn Display]) {
        self.log(LogLevel::Info, args);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, args: &[&dyn Display]) {
        self.log(LogLevel::Warn, args);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, args: &[&dyn Display]) {
        self.log(LogLevel::Error, args);
    }

    #[inline]
    #[track_caller]
    pub fn panic(&self, args: &[&dyn Display]) {
        self.log(LogLevel::Panic, args);
    }

    #[inline]
    #[track_caller]
    pub fn fatal(&self, args: &[&dyn Display]) -> ! {
        self.log(LogLevel::Fatal, args);
        unreachable!("fatal logging exits the process")
    }

    #[inline]
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Debug, args);
    }

    #[inline]
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Info, args);
    }

    #[inline]
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Warn, args);
    }

    #[inline]
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Error, args);
    }

    #[inline]
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Panic, args);
    }

    #[inline]
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.logf(LogLevel::Fatal, args);
        unreachable!("fatal logging exits the process")
    }

    #[inline]
    #[track_caller]
    pub fn debugw(&self, message: &str, keys_and_values: &[FieldValue]) {
        self.logw(LogLevel::Debug, message, keys_and_values);
    }

    #[inline]
    #[track_caller]
    pub fn infow(&self, message: &str, keys_and_values: &[FieldValue]) {
        self.logw(LogLevel::Info, message, keys_and_values);
    }

    #[inline]
    #[track_caller]
    pub fn warnw(&self, message: &str, keys_and_values: &[FieldValue]) {
        self.logw(LogLevel::Warn, message, keys_and_values);
    }

    #[inline]
    #[track_caller]
    pub fn errorw(&self, message: &str, keys_and_values: &[FieldValue]) {
        self.logw(LogLevel::Error, message, keys_and_values);
    }

    #[inline]
    #[track_caller]
    pub fn panicw(&self, message: &str, keys_and_values: &[FieldValue]) {
        self.logw(LogLevel::Panic, message, keys_and_values);
    }

    #[inline]
    #[track_caller]
    pub fn fatalw(&self, message: &str, keys_and_values: &[FieldValue]) -> ! {
        self.logw(LogLevel::Fatal, message, keys_and_values);
        unreachable!("fatal logging exits the process")
    }
}

fn join_args(args: &[&dyn Display]) -> String {
    let mut message = String::new();
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            message.push(' ');
        }
        let _ = write!(message, "{}", arg);
    }
    message
}

/// Pair up an alternating key/value list.
///
/// A trailing key without a value becomes an `ignored` field holding the
/// key. Pairs whose key is not a string are collected into one `invalid`
/// field rendered as `key=value` items.
pub fn sweeten(keys_and_values: &[FieldValue]) -> Vec<Field> {
    let mut fields = Vec::with_capacity(keys_and_values.len() / 2 + 1);
    let mut invalid: Vec<String> = Vec::new();

    for pair in keys_and_values.chunks(2) {
        match pair {
            [key, value] => match key.as_key() {
                Some(k) => fields.push(Field::new(k, value.clone())),
                None => invalid.push(format!("{}={}", key, value)),
            },
            [dangling] => fields.push(Field::new(IGNORED_KEY, dangling.clone())),
            _ => {}
        }
    }

    if !invalid.is_empty() {
        fields.push(Field::new(INVALID_KEY, invalid.join(", ")));
    }
    fields
}
