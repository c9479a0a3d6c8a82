//! File-class sink: timestamped record lines, size-oriented rollover, and a
//! single-consumer writer thread so callers never block on disk latency.

use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write},
    path::PathBuf,
    thread::JoinHandle,
};

use chrono::Local;
use crossbeam_channel::{Receiver, Sender, bounded};

use crate::types::Level;

use super::Sink;

/// Rollover threshold, roughly 4000 record lines per file.
const MAX_BYTES: u64 = 500 * 1024;
const QUEUE_BOUND: usize = 512;
const NEW_LINE_REPLACEMENT: &str = " <br> ";

enum Command {
    Record(String),
    Flush(Sender<()>),
    Shutdown,
}

/// Sink that appends `{timestamp},{LEVEL},{tag}:{message}` records to
/// `<base>_<n>.log` files under a directory, starting a new file once the
/// current one reaches the size limit.
///
/// `emit` formats the record and enqueues it; a dedicated writer thread
/// performs all I/O and swallows its errors. A full queue drops the record
/// rather than blocking the calling thread.
pub struct DiskSink {
    tx: Sender<Command>,
    worker: Option<JoinHandle<()>>,
}

impl DiskSink {
    /// Disk sink writing `logs_<n>.log` files under `dir` with default limits.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_limits(dir, "logs", MAX_BYTES, QUEUE_BOUND)
    }

    /// Disk sink with an explicit file base name, rollover threshold, and
    /// queue bound.
    pub fn with_limits(
        dir: impl Into<PathBuf>,
        base: impl Into<String>,
        max_bytes: u64,
        queue_bound: usize,
    ) -> Self {
        let (tx, rx) = bounded(queue_bound);
        let writer = RollingWriter::new(dir.into(), base.into(), max_bytes);
        let worker = std::thread::Builder::new()
            .name("prettylog-disk".into())
            .spawn(move || writer_loop(rx, writer))
            .ok();
        Self { tx, worker }
    }

    /// Blocks until every record enqueued before this call has been written
    /// and flushed.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = bounded(0);
        if self.tx.send(Command::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl Drop for DiskSink {
    fn drop(&mut self) {
        let _ = self.tx.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Sink for DiskSink {
    fn is_file_class(&self) -> bool {
        true
    }

    fn emit(&self, level: Level, tag: &str, line: &str) {
        let _ = self.tx.try_send(Command::Record(format_record(level, tag, line)));
    }
}

fn format_record(level: Level, tag: &str, line: &str) -> String {
    let timestamp = Local::now().format("%Y.%m.%d %H:%M:%S%.3f");
    // an embedded line break would split the record, so replace it
    let message = if line.contains('\n') {
        line.replace('\n', NEW_LINE_REPLACEMENT)
    } else {
        line.to_string()
    };
    format!("{timestamp},{},{tag}:{message}\n", level.name())
}

fn writer_loop(rx: Receiver<Command>, mut writer: RollingWriter) {
    while let Ok(command) = rx.recv() {
        match command {
            Command::Record(record) => {
                let _ = writer.write(&record);
            }
            Command::Flush(ack) => {
                let _ = writer.flush();
                let _ = ack.send(());
            }
            Command::Shutdown => break,
        }
    }
    let _ = writer.flush();
}

struct RollingWriter {
    dir: PathBuf,
    base: String,
    max_bytes: u64,
    index: usize,
    written: u64,
    out: Option<BufWriter<File>>,
}

impl RollingWriter {
    fn new(dir: PathBuf, base: String, max_bytes: u64) -> Self {
        Self {
            dir,
            base,
            max_bytes,
            index: 0,
            written: 0,
            out: None,
        }
    }

    fn write(&mut self, record: &str) -> io::Result<()> {
        if self.out.is_none() {
            self.open_current()?;
        } else if self.written >= self.max_bytes {
            self.roll()?;
        }
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        out.write_all(record.as_bytes())?;
        out.flush()?;
        self.written += record.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(out) = self.out.as_mut() {
            out.flush()?;
        }
        Ok(())
    }

    /// Opens the first `<base>_<n>.log` that is still below the size limit,
    /// resuming a partially filled file from an earlier run.
    fn open_current(&mut self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        loop {
            let path = self.dir.join(format!("{}_{}.log", self.base, self.index));
            match fs::metadata(&path) {
                Ok(meta) if meta.len() >= self.max_bytes => {
                    self.index += 1;
                }
                Ok(meta) => {
                    self.written = meta.len();
                    self.out = Some(BufWriter::new(open_append(&path)?));
                    return Ok(());
                }
                Err(_) => {
                    self.written = 0;
                    self.out = Some(BufWriter::new(open_append(&path)?));
                    return Ok(());
                }
            }
        }
    }

    fn roll(&mut self) -> io::Result<()> {
        if let Some(mut out) = self.out.take() {
            let _ = out.flush();
        }
        self.index += 1;
        self.open_current()
    }
}

fn open_append(path: &std::path::Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
