//! Per-thread one-shot overrides and pending appends.

use std::thread::{self, ThreadId};

use hashbrown::HashMap;
use parking_lot::Mutex;

use crate::config::{DEFAULT_TAG, LogConfig};

/// Override state for one calling thread. Every field is consumed by the
/// next terminal log call on that thread.
#[derive(Debug, Default)]
struct CallScope {
    one_shot_tag: Option<String>,
    one_shot_frame_count: Option<u32>,
    one_shot_to_file: Option<bool>,
    pending_appends: Vec<String>,
}

/// Effective per-call settings after one-shot and default resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Effective tag.
    pub tag: String,
    /// Effective caller-frame count.
    pub frame_count: u32,
    /// Effective file-class destination flag.
    pub to_file: bool,
    /// Pending append blocks, in the order they were pushed.
    pub appends: Vec<String>,
}

/// Registry of [`CallScope`]s keyed by calling thread.
///
/// Scopes are created lazily on first use and live for the registry's
/// lifetime; entries for threads that have exited are never reclaimed, which
/// leaks a few dozen bytes per dead logging thread but cannot affect
/// correctness.
#[derive(Default)]
pub struct ScopeRegistry {
    scopes: Mutex<HashMap<ThreadId, CallScope>>,
}

impl ScopeRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a tag for the current thread's next terminal call.
    pub fn set_tag_once(&self, tag: impl Into<String>) {
        self.with_current(|scope| scope.one_shot_tag = Some(tag.into()));
    }

    /// Stores a caller-frame count for the current thread's next terminal call.
    pub fn set_frame_count_once(&self, count: u32) {
        self.with_current(|scope| scope.one_shot_frame_count = Some(count));
    }

    /// Stores a file-destination flag for the current thread's next terminal call.
    pub fn set_to_file_once(&self, to_file: bool) {
        self.with_current(|scope| scope.one_shot_to_file = Some(to_file));
    }

    /// Buffers a pre-rendered append block; empty strings are ignored.
    pub fn push_append(&self, block: impl Into<String>) {
        let block = block.into();
        if block.is_empty() {
            return;
        }
        self.with_current(|scope| scope.pending_appends.push(block));
    }

    /// Resolves the current thread's effective settings against `config` and
    /// clears all one-shot state.
    ///
    /// Called exactly once per terminal log call, including calls that are
    /// then discarded by the minimum-level filter: an override affects the
    /// next call, whether or not that call produces output.
    pub fn resolve_and_clear(&self, config: &LogConfig) -> Resolved {
        self.with_current(|scope| {
            let tag = scope.one_shot_tag.take().unwrap_or_else(|| {
                if config.tag.is_empty() {
                    DEFAULT_TAG.to_string()
                } else {
                    config.tag.clone()
                }
            });
            Resolved {
                tag,
                frame_count: scope
                    .one_shot_frame_count
                    .take()
                    .unwrap_or(config.frame_count),
                to_file: scope.one_shot_to_file.take().unwrap_or(config.to_file),
                appends: std::mem::take(&mut scope.pending_appends),
            }
        })
    }

    fn with_current<R>(&self, f: impl FnOnce(&mut CallScope) -> R) -> R {
        let mut scopes = self.scopes.lock();
        let scope = scopes.entry(thread::current().id()).or_default();
        f(scope)
    }
}
