//! # xlog
//!
//! A process-wide default logger with package-level logging functions.
//!
//! ## Features
//!
//! - **Zero setup**: logs at `debug` level to standard output until [`init`] is called
//! - **Rotating files**: 128 MiB segments, timestamped backups, gzip compression
//! - **Four call styles**: variadic, format, key/value and typed fields at every level
//! - **Caller annotation**: every record carries the `dir/file.rs:line` of the call site
//!
//! ## Example
//!
//! ```
//! use xlog::{field, Config};
//!
//! xlog::init(&Config::stdout("info"));
//!
//! xlog::info(&[&"service", &"started"]);
//! xlog::infof(format_args!("listening on {}", 8080));
//! xlog::infow("request", &["path".into(), "/health".into()]);
//! xlog::infoz("request", &[field::string("path", "/health")]);
//! xlog::debug(&[&"filtered out"]);
//! ```

pub mod core;
pub mod facade;
pub mod macros;
pub mod sinks;

pub use crate::core::field;

pub mod prelude {
    pub use crate::core::{
        Config, Encoder, EncoderConfig, Encoding, Field, FieldValue, LogEntry, LogLevel, Logger,
        LoggerBuilder, LoggerError, LoggerOptions, Result, Sink, SugaredLogger,
    };
    pub use crate::field;
    pub use crate::sinks::{RotatingFileSink, RotationPolicy, StdoutSink, WriterSink};
}

pub use crate::core::{
    Caller, Config, Encoder, EncoderConfig, Encoding, Field, FieldValue, LevelEncoding, LogEntry,
    LogLevel, Logger, LoggerBuilder, LoggerError, LoggerOptions, Result, Sink, SugaredLogger,
    TimeEncoding, DEFAULT_MAX_SIZE_MB,
};
pub use facade::*;
