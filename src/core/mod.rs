//! Core logger types and traits

pub mod config;
pub mod encoder;
pub mod error;
pub mod field;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod registry;
pub mod sink;
pub mod sugar;

pub use config::{Config, DEFAULT_MAX_SIZE_MB};
pub use encoder::{Encoder, EncoderConfig, Encoding, LevelEncoding, TimeEncoding};
pub use error::{LoggerError, Result};
pub use field::{Field, FieldValue};
pub use log_entry::{Caller, LogEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, LoggerOptions};
pub use sink::Sink;
pub use sugar::SugaredLogger;
