//! Sink implementations and sink selection

pub mod rotating_file;
pub mod stdout;
pub mod writer;

pub use rotating_file::{RotatingFileSink, RotationPolicy};
pub use stdout::StdoutSink;
pub use writer::WriterSink;

pub use crate::core::Sink;

use crate::core::Config;

/// Pick the byte sink a configuration asks for.
///
/// An empty `file` selects standard output; anything else a rotating file
/// at that path. Nothing is opened here, so this never fails.
pub fn select_sink(config: &Config) -> Box<dyn Sink> {
    if config.uses_stdout() {
        Box::new(StdoutSink::new())
    } else {
        Box::new(RotatingFileSink::with_policy(
            &config.file,
            RotationPolicy::from_config(config),
        ))
    }
}
