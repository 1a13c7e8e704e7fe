//! Sink trait for record destinations

use super::error::Result;

/// A byte destination for encoded records.
///
/// `write_record` receives exactly one complete, newline-terminated record.
/// Implementations must write it in one piece so concurrent records never
/// interleave; the logger already serializes calls on a single sink.
pub trait Sink: Send + Sync {
    fn write_record(&mut self, record: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
