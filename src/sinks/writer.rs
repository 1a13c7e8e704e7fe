//! Adapter turning any `io::Write` into a sink

use crate::core::{Result, Sink};
use std::io::Write;

/// Wraps an arbitrary writer (a socket, a pipe, an in-memory buffer).
///
/// # Examples
///
/// ```
/// use xlog::sinks::WriterSink;
/// use xlog::{Encoder, LogLevel, Logger};
///
/// let logger = Logger::from_parts(
///     Box::new(WriterSink::new(std::io::sink())),
///     Encoder::default(),
///     LogLevel::Debug,
/// );
/// logger.info("discarded", &[]);
/// ```
pub struct WriterSink<W> {
    writer: W,
    name: String,
}

impl<W: Write + Send + Sync> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            name: "writer".to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + Sync> Sink for WriterSink<W> {
    fn write_record(&mut self, record: &[u8]) -> Result<()> {
        self.writer.write_all(record)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_whole_records() {
        let mut sink = WriterSink::new(Vec::new()).with_name("memory");
        sink.write_record(b"one\n").unwrap();
        sink.write_record(b"two\n").unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.name(), "memory");
        assert_eq!(sink.into_inner(), b"one\ntwo\n");
    }
}
