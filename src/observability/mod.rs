//! OpenTelemetry tracing with span export to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `<data_dir>/panenav-spans.jsonl`, one JSON object per span,
//! rotated into numbered backups once the file reaches 5 MiB. Tracing is
//! optional: the coordinator works the same without a subscriber, and shelf
//! commands then carry no trace context.
//!
//! - [`init`]: subscriber setup and level resolution
//! - `tracer`: provider and span exporter
//! - [`span_formatter`]: span → JSON
//! - [`file_writer`]: size-rotated line writer

pub mod file_writer;
pub mod init;
pub mod span_formatter;
mod tracer;

pub use file_writer::{RotatingWriter, RotationPolicy};
pub use init::init_tracing;
