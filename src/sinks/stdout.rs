//! Standard output sink

use crate::core::{Result, Sink};
use std::io::{self, Write};

/// Writes each record to standard output while holding stdout's lock.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for StdoutSink {
    fn write_record(&mut self, record: &[u8]) -> Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(record)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}
