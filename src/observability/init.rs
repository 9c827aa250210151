//! Subscriber setup: `tracing` macros → OpenTelemetry → trace file.

use super::file_writer::RotationPolicy;
use super::tracer;
use crate::domain::error::Result;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const SERVICE_NAME: &str = "panenav";
pub const TRACE_FILE_NAME: &str = "panenav-spans.jsonl";

/// Installs the global subscriber exporting spans to the data directory.
///
/// `RUST_LOG` wins over `config.trace_level`, which defaults to `info`.
/// Calling this again after a subscriber is installed leaves the first one
/// in place. Returns the trace file path.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn init_tracing(config: &Config) -> Result<PathBuf> {
    let data_dir = config.data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let trace_file = data_dir.join(TRACE_FILE_NAME);

    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let provider =
        tracer::file_tracer_provider(trace_file.clone(), SERVICE_NAME, RotationPolicy::default());
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    if tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }

    Ok(trace_file)
}
