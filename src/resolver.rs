//! Caller-frame extraction from the execution stack.

/// Walk start index: the terminal call always sits at least this many frames
/// above the capture point.
pub const MIN_STACK_OFFSET: usize = 2;

/// One execution-stack frame as reported to the event header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerFrame {
    /// Fully qualified symbol path, e.g. `app::net::Client::connect`.
    pub symbol: String,
    /// Source file name without its directory.
    pub file: String,
    /// Source line number, 0 when unknown.
    pub line: u32,
}

impl CallerFrame {
    /// Frame with the given symbol path and source position.
    pub fn new(symbol: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            symbol: symbol.into(),
            file: file.into(),
            line,
        }
    }

    /// Last path segment of the symbol, e.g. `connect`.
    pub fn member(&self) -> &str {
        self.symbol.rsplit("::").next().unwrap_or(&self.symbol)
    }

    /// Second-to-last path segment of the symbol, e.g. `Client`; falls back
    /// to the whole symbol for single-segment paths.
    pub fn type_name(&self) -> &str {
        let mut segments = self.symbol.rsplit("::");
        let last = segments.next();
        segments.next().or(last).unwrap_or(&self.symbol)
    }
}

/// Captures the current execution stack, innermost frame first.
///
/// The real implementation walks the platform stack; tests substitute
/// [`FixedResolver`] for deterministic frames.
pub trait CallerResolver: Send + Sync {
    /// Current stack, innermost frame first.
    fn capture(&self) -> Vec<CallerFrame>;
}

/// Index of the last engine-internal frame, walking up from
/// [`MIN_STACK_OFFSET`]; `base + 1` is the first caller frame.
///
/// Returns `None` when every walked frame belongs to the engine, in which
/// case caller-frame decoration is skipped for the event.
pub fn find_base_offset(stack: &[CallerFrame]) -> Option<usize> {
    for (index, frame) in stack.iter().enumerate().skip(MIN_STACK_OFFSET) {
        if !is_engine_frame(&frame.symbol) {
            return Some(index - 1);
        }
    }
    None
}

/// Up to `count` caller frames starting above `base`, innermost first.
/// Requests past the end of the stack are silently truncated.
pub fn select(stack: &[CallerFrame], base: usize, count: u32) -> Vec<CallerFrame> {
    let start = base.saturating_add(1).min(stack.len());
    let end = start.saturating_add(count as usize).min(stack.len());
    stack[start..end].to_vec()
}

fn is_engine_frame(symbol: &str) -> bool {
    // qualified impl symbols demangle as `<crate::Type as crate::Trait>::method`
    let symbol = symbol.strip_prefix('<').unwrap_or(symbol);
    symbol.starts_with("prettylog::") || symbol.starts_with("backtrace::")
}

/// Stack introspection backed by the `backtrace` crate.
///
/// Symbolication quality depends on build settings; frames that cannot be
/// named are dropped, so header decoration is best-effort in optimized
/// builds.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktraceResolver;

impl CallerResolver for BacktraceResolver {
    fn capture(&self) -> Vec<CallerFrame> {
        let trace = backtrace::Backtrace::new();
        let mut frames = Vec::new();
        for frame in trace.frames() {
            for symbol in frame.symbols() {
                let Some(name) = symbol.name() else {
                    continue;
                };
                let symbol_path = trim_hash(&name.to_string()).to_string();
                let file = symbol
                    .filename()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let line = symbol.lineno().unwrap_or(0);
                frames.push(CallerFrame::new(symbol_path, file, line));
            }
        }
        frames
    }
}

/// Deterministic resolver returning a fixed synthetic stack.
#[derive(Debug, Clone, Default)]
pub struct FixedResolver {
    frames: Vec<CallerFrame>,
}

impl FixedResolver {
    /// Resolver that always reports `frames`, innermost first.
    pub fn new(frames: Vec<CallerFrame>) -> Self {
        Self { frames }
    }
}

impl CallerResolver for FixedResolver {
    fn capture(&self) -> Vec<CallerFrame> {
        self.frames.clone()
    }
}

/// Strips the trailing `::h<16 hex digits>` disambiguator rustc appends to
/// mangled symbols.
fn trim_hash(symbol: &str) -> &str {
    if let Some((head, tail)) = symbol.rsplit_once("::") {
        if tail.len() == 17
            && tail.starts_with('h')
            && tail[1..].bytes().all(|b| b.is_ascii_hexdigit())
        {
            return head;
        }
    }
    symbol
}
