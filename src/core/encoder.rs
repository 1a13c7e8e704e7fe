//! Record encoders
//!
//! Turns a [`LogEntry`] into one line of bytes:
//! - Console: tab-separated human-readable layout, fields as a trailing JSON object
//! - Json: one JSON object per line
//!
//! Field order is preserved exactly as the caller supplied it, so the JSON
//! text is assembled by hand instead of going through a `serde_json::Map`.

use super::log_entry::LogEntry;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Layout of an encoded record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// `2025-01-08T10:30:45.123+0100	info	app/main.rs:12	started	{"port":8080}`
    #[default]
    Console,

    /// `{"level":"info","ts":"2025-01-08T10:30:45.123+0100","caller":"app/main.rs:12","msg":"started","port":8080}`
    Json,
}

/// How the record timestamp is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeEncoding {
    /// Floating-point seconds since the Unix epoch
    #[default]
    Epoch,

    /// ISO 8601 with milliseconds and numeric offset: `2025-01-08T10:30:45.123+0100`
    Iso8601,
}

/// How the level name is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LevelEncoding {
    #[default]
    Lowercase,
    Capital,
    /// Lowercase with ANSI colors (console only)
    #[cfg(feature = "color")]
    LowercaseColor,
}

/// Key names and per-element encodings shared by both layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub message_key: String,
    pub line_ending: String,
    pub time: TimeEncoding,
    pub level: LevelEncoding,
}

impl EncoderConfig {
    /// Production key names with epoch timestamps and lowercase levels.
    #[must_use]
    pub fn production() -> Self {
        Self {
            time_key: "ts".to_string(),
            level_key: "level".to_string(),
            name_key: "logger".to_string(),
            caller_key: "caller".to_string(),
            message_key: "msg".to_string(),
            line_ending: "\n".to_string(),
            time: TimeEncoding::Epoch,
            level: LevelEncoding::Lowercase,
        }
    }

    /// Production defaults with ISO 8601 timestamps; what every logger
    /// built from a [`Config`](crate::Config) uses.
    #[must_use]
    pub fn iso8601() -> Self {
        Self {
            time: TimeEncoding::Iso8601,
            ..Self::production()
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_level_encoding(mut self, level: LevelEncoding) -> Self {
        self.level = level;
        self
    }

    fn encode_time(&self, entry: &LogEntry) -> String {
        match self.time {
            TimeEncoding::Iso8601 => entry
                .timestamp
                .format("%Y-%m-%dT%H:%M:%S%.3f%z")
                .to_string(),
            TimeEncoding::Epoch => {
                let micros = entry.timestamp.timestamp_micros();
                format!("{:.6}", micros as f64 / 1_000_000.0)
            }
        }
    }

    #[cfg_attr(not(feature = "color"), allow(unused_variables))]
    fn encode_level(&self, entry: &LogEntry, colored: bool) -> String {
        match self.level {
            LevelEncoding::Lowercase => entry.level.to_str().to_string(),
            LevelEncoding::Capital => entry.level.to_capital_str().to_string(),
            #[cfg(feature = "color")]
            LevelEncoding::LowercaseColor => {
                if colored {
                    use colored::Colorize;
                    entry
                        .level
                        .to_str()
                        .color(entry.level.color_code())
                        .to_string()
                } else {
                    entry.level.to_str().to_string()
                }
            }
        }
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::iso8601()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoder {
    encoding: Encoding,
    config: EncoderConfig,
}

impl Encoder {
    pub fn new(encoding: Encoding, config: EncoderConfig) -> Self {
        Self { encoding, config }
    }

    pub fn console(config: EncoderConfig) -> Self {
        Self::new(Encoding::Console, config)
    }

    pub fn json(config: EncoderConfig) -> Self {
        Self::new(Encoding::Json, config)
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode one record, including the trailing line ending.
    pub fn encode(&self, entry: &LogEntry) -> String {
        let mut line = match self.encoding {
            Encoding::Console => self.encode_console(entry),
            Encoding::Json => self.encode_json(entry),
        };
        line.push_str(&self.config.line_ending);
        line
    }

    fn encode_console(&self, entry: &LogEntry) -> String {
        let mut elements = Vec::with_capacity(6);
        elements.push(self.config.encode_time(entry));
        elements.push(self.config.encode_level(entry, true));
        if let Some(ref name) = entry.logger_name {
            elements.push(name.clone());
        }
        if let Some(ref caller) = entry.caller {
            elements.push(caller.short());
        }
        elements.push(entry.message.clone());

        let mut line = elements.join("\t");
        if !entry.fields.is_empty() {
            line.push('\t');
            line.push('{');
            push_fields(&mut line, entry);
            line.push('}');
        }
        line
    }

    fn encode_json(&self, entry: &LogEntry) -> String {
        let cfg = &self.config;
        let mut line = String::with_capacity(128);
        line.push('{');
        push_pair(&mut line, &cfg.level_key, &json_string(&cfg.encode_level(entry, false)));
        line.push(',');
        push_pair(&mut line, &cfg.time_key, &self.json_time(entry));
        if let Some(ref name) = entry.logger_name {
            line.push(',');
            push_pair(&mut line, &cfg.name_key, &json_string(name));
        }
        if let Some(ref caller) = entry.caller {
            line.push(',');
            push_pair(&mut line, &cfg.caller_key, &json_string(&caller.short()));
        }
        line.push(',');
        push_pair(&mut line, &cfg.message_key, &json_string(&entry.message));
        if !entry.fields.is_empty() {
            line.push(',');
            push_fields(&mut line, entry);
        }
        line.push('}');
        line
    }

    fn json_time(&self, entry: &LogEntry) -> String {
        match self.config.time {
            // Epoch is a bare number in JSON
            TimeEncoding::Epoch => self.config.encode_time(entry),
            TimeEncoding::Iso8601 => json_string(&self.config.encode_time(entry)),
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::console(EncoderConfig::iso8601())
    }
}

fn json_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn push_pair(out: &mut String, key: &str, encoded_value: &str) {
    let _ = write!(out, "{}:{}", json_string(key), encoded_value);
}

fn push_fields(out: &mut String, entry: &LogEntry) {
    for (idx, field) in entry.fields.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        push_pair(out, &field.key, &field.value.to_json_value().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field;
    use crate::core::log_entry::Caller;
    use crate::core::LogLevel;

    fn sample() -> LogEntry {
        LogEntry::new(LogLevel::Warn, "disk low")
            .with_caller(Caller { file: "src/storage/disk.rs", line: 88 })
            .with_fields(vec![field::int("free_mb", 12), field::string("mount", "/data")])
    }

    #[test]
    fn test_console_layout() {
        let line = Encoder::default().encode(&sample());
        assert!(line.ends_with('\n'));

        let parts: Vec<&str> = line.trim_end().split('\t').collect();
        assert_eq!(parts.len(), 5);
        assert_eq!(parts[1], "warn");
        assert_eq!(parts[2], "storage/disk.rs:88");
        assert_eq!(parts[3], "disk low");
        assert_eq!(parts[4], r#"{"free_mb":12,"mount":"/data"}"#);
    }

    #[test]
    fn test_console_iso8601_time() {
        let entry = LogEntry::new(LogLevel::Info, "x");
        let line = Encoder::default().encode(&entry);
        let ts = line.split('\t').next().unwrap();

        // 2025-01-08T10:30:45.123+0100
        assert_eq!(ts.len(), 28, "unexpected timestamp {}", ts);
        assert_eq!(&ts[10..11], "T");
        assert_eq!(&ts[19..20], ".");
        assert!(ts[23..].starts_with('+') || ts[23..].starts_with('-'));
    }

    #[test]
    fn test_console_without_fields_or_caller() {
        let entry = LogEntry::new(LogLevel::Info, "plain").with_name(Some("db"));
        let line = Encoder::default().encode(&entry);
        let parts: Vec<&str> = line.trim_end().split('\t').collect();
        assert_eq!(&parts[1..], ["info", "db", "plain"]);
    }

    #[test]
    fn test_json_layout() {
        let line = Encoder::json(EncoderConfig::iso8601()).encode(&sample());
        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["msg"], "disk low");
        assert_eq!(parsed["caller"], "storage/disk.rs:88");
        assert_eq!(parsed["free_mb"], 12);
        assert_eq!(parsed["mount"], "/data");
        assert!(parsed["ts"].is_string());
    }

    #[test]
    fn test_json_epoch_time_is_number() {
        let entry = LogEntry::new(LogLevel::Debug, "tick");
        let line = Encoder::json(EncoderConfig::production()).encode(&entry);
        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert!(parsed["ts"].is_f64());
    }

    #[test]
    fn test_capital_levels() {
        let config = EncoderConfig::iso8601().with_level_encoding(LevelEncoding::Capital);
        let line = Encoder::console(config).encode(&LogEntry::new(LogLevel::Error, "boom"));
        assert!(line.contains("\tERROR\t"));
    }

    #[test]
    fn test_field_order_preserved() {
        let entry = LogEntry::new(LogLevel::Info, "order").with_fields(vec![
            field::int("z", 1),
            field::int("a", 2),
        ]);
        let line = Encoder::default().encode(&entry);
        assert!(line.contains(r#"{"z":1,"a":2}"#));
    }
}
