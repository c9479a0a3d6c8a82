use criterion::{Criterion, criterion_group, criterion_main};

use prettylog::{
    config::LogConfig,
    format::{LogEvent, render},
    logger::Logger,
    resolver::{CallerFrame, FixedResolver},
    sink::Sink,
    types::Level,
};

struct NullSink;

impl Sink for NullSink {
    fn emit(&self, _level: Level, _tag: &str, _line: &str) {}
}

fn event(message: String, appends: Vec<String>, frames: Vec<CallerFrame>) -> LogEvent {
    LogEvent {
        level: Level::Info,
        tag: "BENCH".to_string(),
        frames,
        appends,
        message,
        to_file: false,
    }
}

fn bench_render(c: &mut Criterion) {
    c.bench_function("render_single_line", |b| {
        b.iter(|| {
            let _ = render(&event("health check ok".to_string(), vec![], vec![]), false);
        });
    });

    c.bench_function("render_framed_with_appends", |b| {
        b.iter(|| {
            let _ = render(
                &event(
                    "request completed".to_string(),
                    vec!["status: 200".to_string(), "elapsed: 12ms".to_string()],
                    vec![
                        CallerFrame::new("app::api::Api::handle", "api.rs", 31),
                        CallerFrame::new("app::server::Server::run", "server.rs", 88),
                    ],
                ),
                false,
            );
        });
    });

    c.bench_function("render_oversized_12k", |b| {
        let payload = "x".repeat(12_000);
        b.iter(|| {
            let _ = render(&event(payload.clone(), vec![], vec![]), false);
        });
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let log = Logger::with_resolver(
        LogConfig::new()
            .tag("BENCH")
            .frame_count(0)
            .show_thread_info(false)
            .add_sink(std::sync::Arc::new(NullSink)),
        Box::new(FixedResolver::new(vec![])),
    );

    c.bench_function("dispatch_single_line", |b| {
        b.iter(|| log.info("health check ok"));
    });

    c.bench_function("dispatch_with_appends", |b| {
        b.iter(|| {
            log.append("status: 200").append("elapsed: 12ms").info("done");
        });
    });
}

criterion_group!(benches, bench_render, bench_dispatch);
criterion_main!(benches);
