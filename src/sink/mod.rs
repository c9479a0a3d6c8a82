//! Output destination contract and bundled sink implementations.

/// Console (stdout) sink.
pub mod console;
/// File-class sink with a background writer thread.
pub mod disk;

use crate::types::Level;

/// A registered output destination.
///
/// Sinks receive one rendered line at a time, already decorated and chunked.
/// Delivery failures stay inside the sink; `emit` has no error channel, and
/// logging never unwinds into the host application.
pub trait Sink: Send + Sync {
    /// Inclusion policy hook; the default accepts everything.
    fn accepts(&self, level: Level, tag: &str) -> bool {
        let _ = (level, tag);
        true
    }

    /// File-class sinks perform persistent storage and only receive events
    /// whose resolved destination flag is set.
    fn is_file_class(&self) -> bool {
        false
    }

    /// Delivers one rendered line.
    fn emit(&self, level: Level, tag: &str, line: &str);
}
