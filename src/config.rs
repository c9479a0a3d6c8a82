//! Process-wide defaults, mutated during setup and read thereafter.

use std::sync::Arc;

use crate::{sink::Sink, types::Level};

/// Tag used when neither a one-shot nor a configured tag is set.
pub const DEFAULT_TAG: &str = "PRETTYLOG";

/// Engine configuration. Build it once with the chained setters, hand it to
/// [`crate::logger::Logger::new`], and treat it as read-only afterwards;
/// mutating shared configuration while other threads are logging is a
/// configure-then-run violation, not a supported mode.
pub struct LogConfig {
    /// Default tag; an empty string falls back to [`DEFAULT_TAG`].
    pub tag: String,
    /// Default number of caller frames in the event header; 0 disables it.
    pub frame_count: u32,
    /// Appends `[thread-name]` to the tag of every rendered line.
    pub show_thread_info: bool,
    /// Whether file-class sinks receive output when no one-shot flag is set.
    pub to_file: bool,
    /// Events below this level are discarded; [`Level::None`] suppresses all.
    pub min_level: Level,
    sinks: Vec<Arc<dyn Sink>>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            tag: String::new(),
            frame_count: 1,
            show_thread_info: true,
            to_file: false,
            min_level: Level::Verbose,
            sinks: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Configuration with library defaults and no sinks registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Sets the default caller-frame count; 0 disables the header block.
    pub fn frame_count(mut self, count: u32) -> Self {
        self.frame_count = count;
        self
    }

    /// Enables or disables the thread-name tag annotation.
    pub fn show_thread_info(mut self, show: bool) -> Self {
        self.show_thread_info = show;
        self
    }

    /// Sets whether file-class sinks receive output by default.
    pub fn to_file(mut self, to_file: bool) -> Self {
        self.to_file = to_file;
        self
    }

    /// Sets the minimum emitted level.
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Registers a sink. Registration order is dispatch order; registering
    /// the same sink instance twice is a no-op.
    pub fn add_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        if !self.sinks.iter().any(|s| Arc::ptr_eq(s, &sink)) {
            self.sinks.push(sink);
        }
        self
    }

    /// Registered sinks in dispatch order.
    pub fn sinks(&self) -> &[Arc<dyn Sink>] {
        &self.sinks
    }
}
