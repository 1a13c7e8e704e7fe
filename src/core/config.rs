//! Logger configuration record

use super::encoder::Encoding;
use super::error::Result;
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// Default segment size of the rotating file sink, in megabytes.
pub const DEFAULT_MAX_SIZE_MB: u64 = 128;

/// Configuration for [`Logger::new`](crate::Logger::new) and [`init`](crate::init).
///
/// Only `file` and `level` are required; everything else defaults to the
/// rotating-file policy of 128 MiB segments, local-time backup names,
/// compression on, and no pruning.
///
/// # Examples
///
/// ```
/// use xlog::Config;
///
/// let config = Config::from_json(r#"{"file": "/var/log/app.log", "level": "warn"}"#).unwrap();
/// assert_eq!(config.max_size_mb, 128);
/// assert!(config.compress);
/// assert_eq!(config.max_backups, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log file path; empty means standard output
    pub file: String,
    /// One of `debug`, `info`, `warn`, `error`, `panic`, `fatal`; anything else means `info`
    pub level: String,
    /// Segment size that triggers rotation
    pub max_size_mb: u64,
    /// Rotated segments to keep, 0 keeps all
    pub max_backups: usize,
    /// Days to keep rotated segments, 0 keeps them forever
    pub max_age_days: u64,
    /// Gzip rotated segments
    pub compress: bool,
    /// Use local time (instead of UTC) in backup file names
    pub local_time: bool,
    pub encoding: Encoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: String::new(),
            level: String::new(),
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            max_backups: 0,
            max_age_days: 0,
            compress: true,
            local_time: true,
            encoding: Encoding::Console,
        }
    }
}

impl Config {
    /// Log to standard output at the given level.
    pub fn stdout(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// Log to a rotating file at the given level.
    pub fn file(path: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            file: path.into(),
            level: level.into(),
            ..Self::default()
        }
    }

    /// Parse a JSON configuration object; missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_age_days(mut self, days: u64) -> Self {
        self.max_age_days = days;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// The minimum level this configuration selects.
    pub fn min_level(&self) -> LogLevel {
        LogLevel::parse_or_info(&self.level)
    }

    pub fn uses_stdout(&self) -> bool {
        self.file.is_empty()
    }

    /// Segment size in bytes.
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }
}
