//! Box-drawing decoration and byte-budget chunking for a single event.

use std::borrow::Cow;

use crate::{
    resolver::CallerFrame,
    types::{Level, RenderedLine},
};

/// Chunk budget in bytes. Oversized content is split at raw byte offsets;
/// a multi-byte character straddling a boundary is replaced lossily in the
/// chunks it spans.
pub const CHUNK_SIZE: usize = 4000;

const HORIZONTAL_LINE: char = '║';
const TOP_BORDER: &str = "╔════════════════════════════════════════════════════════════════════════════════════════";
const BOTTOM_BORDER: &str = "╚════════════════════════════════════════════════════════════════════════════════════════";
const MIDDLE_BORDER: &str = "╟────────────────────────────────────────────────────────────────────────────────────────";

/// One log event with all per-call settings already resolved.
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// Severity.
    pub level: Level,
    /// Resolved tag, before thread annotation.
    pub tag: String,
    /// Caller frames to report, innermost first; empty skips the header.
    pub frames: Vec<CallerFrame>,
    /// Pre-rendered append blocks, oldest first.
    pub appends: Vec<String>,
    /// Final message text, never empty.
    pub message: String,
    /// Whether file-class sinks receive this event.
    pub to_file: bool,
}

/// Renders `event` into its ordered output lines.
///
/// Single-line events with no caller frames and no appends take the
/// borderless fast path: bare chunked content, one line per chunk. Everything
/// else is framed: top border, caller-frame header (outermost first, indent
/// growing by three spaces per frame) with a divider, each append block with
/// a divider, the message block, bottom border.
pub fn render(event: &LogEvent, show_thread_info: bool) -> Vec<RenderedLine> {
    let tag = if show_thread_info {
        let thread = std::thread::current();
        format!("{}[{}]", event.tag, thread.name().unwrap_or("unnamed"))
    } else {
        event.tag.clone()
    };

    let mut lines = Vec::new();

    if event.frames.is_empty() && event.appends.is_empty() && !event.message.contains('\n') {
        for chunk in content_chunks(&event.message) {
            push_line(&mut lines, event.level, &tag, chunk.into_owned());
        }
        return lines;
    }

    push_line(&mut lines, event.level, &tag, TOP_BORDER);
    if !event.frames.is_empty() {
        for (depth, frame) in event.frames.iter().rev().enumerate() {
            push_line(
                &mut lines,
                event.level,
                &tag,
                format!(
                    "{HORIZONTAL_LINE} {}{}.{}  ({}:{})",
                    "   ".repeat(depth),
                    frame.type_name(),
                    frame.member(),
                    frame.file,
                    frame.line
                ),
            );
        }
        push_line(&mut lines, event.level, &tag, MIDDLE_BORDER);
    }
    for block in &event.appends {
        push_framed(&mut lines, event.level, &tag, block);
        push_line(&mut lines, event.level, &tag, MIDDLE_BORDER);
    }
    push_framed(&mut lines, event.level, &tag, &event.message);
    push_line(&mut lines, event.level, &tag, BOTTOM_BORDER);
    lines
}

fn push_framed(lines: &mut Vec<RenderedLine>, level: Level, tag: &str, content: &str) {
    for chunk in content_chunks(content) {
        for part in chunk.lines() {
            push_line(lines, level, tag, format!("{HORIZONTAL_LINE} {part}"));
        }
    }
}

fn push_line(lines: &mut Vec<RenderedLine>, level: Level, tag: &str, text: impl Into<String>) {
    lines.push(RenderedLine {
        level,
        tag: tag.to_string(),
        text: text.into(),
    });
}

fn content_chunks(content: &str) -> Vec<Cow<'_, str>> {
    let bytes = content.as_bytes();
    if bytes.len() <= CHUNK_SIZE {
        vec![Cow::Borrowed(content)]
    } else {
        bytes.chunks(CHUNK_SIZE).map(String::from_utf8_lossy).collect()
    }
}
