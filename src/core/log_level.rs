//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a record, also used as a logger's minimum level.
///
/// `Panic` and `Fatal` are ordinary levels for filtering purposes; what
/// happens after the record is written is decided by [`LogLevel::terminates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Panic = 4,
    Fatal = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Panic,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Panic => "panic",
            LogLevel::Fatal => "fatal",
        }
    }

    pub fn to_capital_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Panic => "PANIC",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Map a configured level name to a severity.
    ///
    /// Only the exact lowercase names are recognized. Everything else,
    /// including the empty string, falls back to [`LogLevel::Info`].
    ///
    /// ```
    /// use xlog::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse_or_info("warn"), LogLevel::Warn);
    /// assert_eq!(LogLevel::parse_or_info("WARN"), LogLevel::Info);
    /// assert_eq!(LogLevel::parse_or_info(""), LogLevel::Info);
    /// ```
    #[must_use]
    pub fn parse_or_info(name: &str) -> Self {
        match name {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            "panic" => LogLevel::Panic,
            "fatal" => LogLevel::Fatal,
            _ => LogLevel::Info,
        }
    }

    /// Whether emitting at this level ends the caller's control flow
    /// (unwinding for `Panic`, process exit for `Fatal`).
    #[inline]
    pub fn terminates(&self) -> bool {
        matches!(self, LogLevel::Panic | LogLevel::Fatal)
    }

    #[cfg(feature = "color")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Magenta,
            LogLevel::Info => Blue,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Panic => Red,
            LogLevel::Fatal => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    /// Strict parse, for callers that want to reject typos instead of
    /// silently logging at info.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "panic" => Ok(LogLevel::Panic),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        assert_eq!(LogLevel::parse_or_info("debug"), LogLevel::Debug);
        assert_eq!(LogLevel::parse_or_info("info"), LogLevel::Info);
        assert_eq!(LogLevel::parse_or_info("warn"), LogLevel::Warn);
        assert_eq!(LogLevel::parse_or_info("error"), LogLevel::Error);
        assert_eq!(LogLevel::parse_or_info("panic"), LogLevel::Panic);
        assert_eq!(LogLevel::parse_or_info("fatal"), LogLevel::Fatal);
    }

    #[test]
    fn test_parse_unknown_defaults_to_info() {
        for name in ["", "bogus", "trace", "Debug", " info", "warning"] {
            assert_eq!(LogLevel::parse_or_info(name), LogLevel::Info, "{:?}", name);
        }
    }

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Panic);
        assert!(LogLevel::Panic < LogLevel::Fatal);
    }

    #[test]
    fn test_strict_from_str() {
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("Fatal".parse::<LogLevel>().unwrap(), LogLevel::Fatal);
        assert!("bogus".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_terminates() {
        assert!(!LogLevel::Error.terminates());
        assert!(LogLevel::Panic.terminates());
        assert!(LogLevel::Fatal.terminates());
    }
}
