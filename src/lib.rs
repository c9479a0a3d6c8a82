//! Human-readable framed log output with per-call overrides and multi-sink
//! dispatch.
//!
//! Events are decorated with box-drawing borders, optional caller-frame
//! headers, and pretty-printed JSON/XML/object append blocks, chunked to a
//! 4000-byte budget, and fanned out to every registered sink whose policy
//! accepts them. Overrides set through [`logger::Logger::tag`],
//! [`logger::Logger::frame_count`], and [`logger::Logger::to_file`] apply to
//! exactly one subsequent call on the same thread.
//!
//! # Examples
//!
//! Console logging with a one-shot tag override:
//! ```
//! use std::sync::Arc;
//!
//! use prettylog::{
//!     config::LogConfig, logger::Logger, sink::console::ConsoleSink, types::Level,
//! };
//!
//! let log = Logger::new(
//!     LogConfig::new()
//!         .tag("APP")
//!         .frame_count(0)
//!         .min_level(Level::Debug)
//!         .add_sink(Arc::new(ConsoleSink::new())),
//! );
//! log.info("service started");
//! log.tag("NET").warn("socket closed, retrying");
//! log.append_json(r#"{"port": 8080}"#).debug("listener config");
//! ```
//!
//! Disk persistence gated by the destination flag:
//! ```no_run
//! use std::sync::Arc;
//!
//! use prettylog::{config::LogConfig, logger::Logger, sink::disk::DiskSink};
//!
//! let log = Logger::new(
//!     LogConfig::new()
//!         .tag("APP")
//!         .add_sink(Arc::new(DiskSink::new("logs"))),
//! );
//! log.to_file(true).error("write me to disk too");
//! ```

/// Process-wide defaults and sink registration.
pub mod config;
/// Event decoration and chunking.
pub mod format;
/// Engine entry point and dispatch.
pub mod logger;
/// Format-capturing logging macros.
pub mod macros;
/// JSON/XML/object/error payload conversion.
pub mod payload;
/// Caller-frame extraction from the execution stack.
pub mod resolver;
/// Per-thread one-shot override scopes.
pub mod scope;
/// Output destination contract and implementations.
pub mod sink;
/// Level enum and rendered-line primitives.
pub mod types;
