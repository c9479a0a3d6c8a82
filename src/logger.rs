//! Engine entry point: override resolution, message assembly, rendering, and
//! sink fan-out.

use std::error::Error;

use parking_lot::Mutex;
use serde::Serialize;

use crate::{
    config::LogConfig,
    format::{self, LogEvent},
    payload,
    resolver::{self, BacktraceResolver, CallerFrame, CallerResolver},
    scope::ScopeRegistry,
    types::Level,
};

const EMPTY_MESSAGE: &str = "Empty/NULL log message";

/// The logging engine.
///
/// Construct one instance during startup, register sinks on its
/// [`LogConfig`], and share it behind an `Arc` or a `&'static`. The whole
/// resolve-render-dispatch sequence for one event runs under an internal
/// mutex, so a framed block is never interleaved with another thread's
/// output.
pub struct Logger {
    config: LogConfig,
    scopes: ScopeRegistry,
    resolver: Box<dyn CallerResolver>,
    dispatch_lock: Mutex<()>,
}

impl Logger {
    /// Engine with platform stack introspection for caller frames.
    pub fn new(config: LogConfig) -> Self {
        Self::with_resolver(config, Box::new(BacktraceResolver))
    }

    /// Engine with an explicit caller resolver; tests pass a
    /// [`crate::resolver::FixedResolver`].
    pub fn with_resolver(config: LogConfig, resolver: Box<dyn CallerResolver>) -> Self {
        Self {
            config,
            scopes: ScopeRegistry::new(),
            resolver,
            dispatch_lock: Mutex::new(()),
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Overrides the tag for the current thread's next terminal call only.
    pub fn tag(&self, tag: impl Into<String>) -> &Self {
        self.scopes.set_tag_once(tag);
        self
    }

    /// Overrides the caller-frame count for the current thread's next
    /// terminal call only.
    pub fn frame_count(&self, count: u32) -> &Self {
        self.scopes.set_frame_count_once(count);
        self
    }

    /// Overrides the file-destination flag for the current thread's next
    /// terminal call only.
    pub fn to_file(&self, to_file: bool) -> &Self {
        self.scopes.set_to_file_once(to_file);
        self
    }

    /// Buffers a plain block to render above the next terminal call's message.
    pub fn append(&self, message: impl Into<String>) -> &Self {
        self.scopes.push_append(message);
        self
    }

    /// Buffers a pretty-printed JSON block.
    pub fn append_json(&self, json: &str) -> &Self {
        self.scopes.push_append(payload::pretty_json(json));
        self
    }

    /// Buffers a pretty-printed XML block.
    pub fn append_xml(&self, xml: &str) -> &Self {
        self.scopes.push_append(payload::pretty_xml(xml));
        self
    }

    /// Buffers a serializable value as a pretty-printed JSON block.
    pub fn append_object<T: Serialize>(&self, value: &T) -> &Self {
        self.scopes.push_append(payload::pretty_object(value));
        self
    }

    /// Logs at VERBOSE.
    pub fn verbose(&self, message: impl AsRef<str>) {
        self.dispatch(Level::Verbose, None, Some(message.as_ref()), None);
    }

    /// Logs at DEBUG.
    pub fn debug(&self, message: impl AsRef<str>) {
        self.dispatch(Level::Debug, None, Some(message.as_ref()), None);
    }

    /// Logs at INFO.
    pub fn info(&self, message: impl AsRef<str>) {
        self.dispatch(Level::Info, None, Some(message.as_ref()), None);
    }

    /// Logs at WARN.
    pub fn warn(&self, message: impl AsRef<str>) {
        self.dispatch(Level::Warn, None, Some(message.as_ref()), None);
    }

    /// Logs at ERROR.
    pub fn error(&self, message: impl AsRef<str>) {
        self.dispatch(Level::Error, None, Some(message.as_ref()), None);
    }

    /// Logs at ERROR with an error whose rendered text is merged into the
    /// message.
    pub fn error_with(&self, error: &(dyn Error + 'static), message: impl AsRef<str>) {
        self.dispatch(Level::Error, None, Some(message.as_ref()), Some(error));
    }

    /// Logs at ASSERT; for conditions that should never happen.
    pub fn wtf(&self, message: impl AsRef<str>) {
        self.dispatch(Level::Assert, None, Some(message.as_ref()), None);
    }

    /// Generic entry point. An explicit `tag` overrides the one-shot/default
    /// resolution for this call without being stored anywhere.
    pub fn log(
        &self,
        level: Level,
        tag: Option<&str>,
        message: Option<&str>,
        error: Option<&(dyn Error + 'static)>,
    ) {
        self.dispatch(level, tag, message, error);
    }

    /// Pretty-prints a JSON document and logs it at INFO.
    pub fn json(&self, json: &str) {
        self.dispatch(Level::Info, None, Some(&payload::pretty_json(json)), None);
    }

    /// Pretty-prints an XML document and logs it at INFO.
    pub fn xml(&self, xml: &str) {
        self.dispatch(Level::Info, None, Some(&payload::pretty_xml(xml)), None);
    }

    /// Dumps a serializable value as JSON and logs it at INFO.
    pub fn object<T: Serialize>(&self, value: &T) {
        self.dispatch(Level::Info, None, Some(&payload::pretty_object(value)), None);
    }

    fn dispatch(
        &self,
        level: Level,
        explicit_tag: Option<&str>,
        message: Option<&str>,
        error: Option<&(dyn Error + 'static)>,
    ) {
        let _serialized = self.dispatch_lock.lock();

        // One-shot state is consumed even when the event is filtered out:
        // an override applies to the next call, emitted or not.
        let mut resolved = self.scopes.resolve_and_clear(&self.config);
        if let Some(tag) = explicit_tag {
            resolved.tag = tag.to_string();
        }
        if level < self.config.min_level {
            return;
        }

        let message = build_message(message, error);
        let frames = self.caller_frames(resolved.frame_count);
        let event = LogEvent {
            level,
            tag: resolved.tag,
            frames,
            appends: resolved.appends,
            message,
            to_file: resolved.to_file,
        };

        let lines = format::render(&event, self.config.show_thread_info);
        for line in &lines {
            for sink in self.config.sinks() {
                if sink.is_file_class() && !event.to_file {
                    continue;
                }
                if !sink.accepts(line.level, &line.tag) {
                    continue;
                }
                sink.emit(line.level, &line.tag, &line.text);
            }
        }
    }

    fn caller_frames(&self, count: u32) -> Vec<CallerFrame> {
        if count == 0 {
            return Vec::new();
        }
        let stack = self.resolver.capture();
        match resolver::find_base_offset(&stack) {
            Some(base) => resolver::select(&stack, base, count),
            None => Vec::new(),
        }
    }
}

fn build_message(message: Option<&str>, error: Option<&(dyn Error + 'static)>) -> String {
    let merged = match (message, error) {
        (Some(message), Some(error)) => {
            format!("{message} : {}", payload::error_text(error))
        }
        (None, Some(error)) => payload::error_text(error),
        (Some(message), None) => message.to_string(),
        (None, None) => String::new(),
    };
    if merged.is_empty() {
        EMPTY_MESSAGE.to_string()
    } else {
        merged
    }
}
