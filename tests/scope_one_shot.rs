use std::sync::{Arc, Mutex};

use prettylog::{
    config::LogConfig,
    logger::Logger,
    resolver::{CallerFrame, FixedResolver},
    sink::Sink,
    types::Level,
};

#[derive(Default)]
struct MemorySink {
    lines: Mutex<Vec<(Level, String, String)>>,
}

impl MemorySink {
    fn drain(&self) -> Vec<(Level, String, String)> {
        std::mem::take(&mut *self.lines.lock().expect("lock"))
    }
}

impl Sink for MemorySink {
    fn emit(&self, level: Level, tag: &str, line: &str) {
        self.lines
            .lock()
            .expect("lock")
            .push((level, tag.to_string(), line.to_string()));
    }
}

fn quiet_config(sink: Arc<MemorySink>) -> LogConfig {
    LogConfig::new()
        .tag("APP")
        .frame_count(0)
        .show_thread_info(false)
        .add_sink(sink)
}

fn synthetic_stack() -> Vec<CallerFrame> {
    vec![
        CallerFrame::new("prettylog::logger::Logger::dispatch", "logger.rs", 180),
        CallerFrame::new("prettylog::logger::Logger::info", "logger.rs", 120),
        CallerFrame::new("app::App::run", "app.rs", 9),
        CallerFrame::new("app::main", "main.rs", 3),
    ]
}

#[test]
fn one_shot_tag_applies_to_exactly_one_call() {
    let sink = Arc::new(MemorySink::default());
    let log = Logger::new(quiet_config(sink.clone()));

    log.tag("ONCE").info("first");
    log.info("second");

    let lines = sink.drain();
    assert_eq!(lines[0].1, "ONCE");
    assert_eq!(lines[1].1, "APP");
}

#[test]
fn filtered_event_still_consumes_one_shot_state() {
    let sink = Arc::new(MemorySink::default());
    let log = Logger::new(quiet_config(sink.clone()).min_level(Level::Info));

    log.tag("ONCE").append("pending context").debug("discarded");
    assert!(sink.drain().is_empty());

    log.info("kept");
    let lines = sink.drain();
    // the override and the appends were spent on the discarded call
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].1, "APP");
    assert_eq!(lines[0].2, "kept");
}

#[test]
fn one_shot_frame_count_overrides_disabled_default() {
    let sink = Arc::new(MemorySink::default());
    let log = Logger::with_resolver(
        quiet_config(sink.clone()),
        Box::new(FixedResolver::new(synthetic_stack())),
    );

    log.frame_count(1).info("with header");
    let framed = sink.drain();
    assert!(framed[0].2.starts_with('╔'));
    assert_eq!(framed[1].2, "║ App.run  (app.rs:9)");
    assert!(framed[2].2.starts_with('╟'));
    assert_eq!(framed[3].2, "║ with header");
    assert!(framed[4].2.starts_with('╚'));

    log.info("bare again");
    let bare = sink.drain();
    assert_eq!(bare.len(), 1);
    assert_eq!(bare[0].2, "bare again");
}

#[test]
fn frame_count_is_truncated_to_available_stack() {
    let sink = Arc::new(MemorySink::default());
    let log = Logger::with_resolver(
        quiet_config(sink.clone()),
        Box::new(FixedResolver::new(synthetic_stack())),
    );

    // only two caller frames exist above the engine
    log.frame_count(10).info("deep");
    let lines = sink.drain();
    assert_eq!(lines[1].2, "║ app.main  (main.rs:3)");
    assert_eq!(lines[2].2, "║    App.run  (app.rs:9)");
    assert!(lines[3].2.starts_with('╟'));
}

#[test]
fn scopes_are_isolated_per_thread() {
    let sink = Arc::new(MemorySink::default());
    let log = Logger::new(quiet_config(sink.clone()));

    log.tag("ONCE");
    std::thread::scope(|scope| {
        scope
            .spawn(|| log.info("from worker"))
            .join()
            .expect("join");
    });
    log.info("from main");

    let lines = sink.drain();
    assert_eq!(lines[0].1, "APP");
    assert_eq!(lines[0].2, "from worker");
    assert_eq!(lines[1].1, "ONCE");
    assert_eq!(lines[1].2, "from main");
}

#[test]
fn empty_configured_tag_falls_back_to_default_constant() {
    let sink = Arc::new(MemorySink::default());
    let log = Logger::new(
        LogConfig::new()
            .frame_count(0)
            .show_thread_info(false)
            .add_sink(sink.clone()),
    );

    log.info("hello");
    assert_eq!(sink.drain()[0].1, "PRETTYLOG");
}

#[test]
fn appends_buffer_until_the_next_terminal_call() {
    let sink = Arc::new(MemorySink::default());
    let log = Logger::new(quiet_config(sink.clone()));

    log.append("first").append("second");
    assert!(sink.drain().is_empty());

    log.info("done");
    let texts: Vec<String> = sink.drain().into_iter().map(|l| l.2).collect();
    assert!(texts[0].starts_with('╔'));
    assert_eq!(texts[1], "║ first");
    assert!(texts[2].starts_with('╟'));
    assert_eq!(texts[3], "║ second");
    assert!(texts[4].starts_with('╟'));
    assert_eq!(texts[5], "║ done");
    assert!(texts[6].starts_with('╚'));

    log.info("later");
    let later = sink.drain();
    assert_eq!(later.len(), 1, "appends must not leak into later calls");
}
