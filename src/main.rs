//! Replay shim for the coordinator.
//!
//! Reads a JSON-lines script, drives a [`Runtime`] backed by a
//! [`RecordingHost`] and prints every host command as one JSON line.
//!
//! # Usage
//!
//! ```text
//! panenav [--config FILE] [SCRIPT]
//! ```
//!
//! Without `SCRIPT` the script is read from stdin.
//!
//! # Script lines
//!
//! ```text
//! {"note": {"id": 42, "book_id": 7}}              seed a note lookup
//! {"book": {"id": 7, "name": "Work"}}             seed a book name
//! {"needs_confirmation": true}                    visible pane has unsaved edits
//! {"advance_ms": 300}                             advance the scheduler clock
//! {"event": "drawer_slide", "offset": 0.5}        any coordinator event
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use panenav::domain::{BookId, NoteRef};
use panenav::runtime::{RecordingHost, Runtime};
use panenav::{Config, Event, PaneNavError, Result};
use serde::Deserialize;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct BookSeed {
    id: BookId,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Step {
    Advance { advance_ms: u64 },
    Note { note: NoteRef },
    Book { book: BookSeed },
    Confirmation { needs_confirmation: bool },
    Event(Event),
}

#[derive(Debug, Parser)]
#[command(name = "panenav", about = "Replay coordinator events against an in-memory host")]
struct Args {
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON-lines script, stdin when omitted
    script: Option<PathBuf>,
}

fn replay(reader: impl BufRead, runtime: &mut Runtime<RecordingHost>, out: &mut impl Write) -> Result<()> {
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let span = tracing::debug_span!("replay_step", line = index + 1);
        let _guard = span.entered();

        let step: Step = serde_json::from_str(trimmed).map_err(|e| {
            tracing::debug!(error = %e, "malformed script line");
            PaneNavError::Config(format!("line {}: {e}", index + 1))
        })?;

        match step {
            Step::Advance { advance_ms } => {
                runtime.advance(Duration::from_millis(advance_ms));
            }
            Step::Note { note } => runtime.host_mut().add_note(note),
            Step::Book { book } => runtime.host_mut().add_book(book.id, book.name),
            Step::Confirmation { needs_confirmation } => {
                runtime.host_mut().set_needs_confirmation(needs_confirmation);
            }
            Step::Event(event) => {
                runtime.dispatch(event);
            }
        }

        for action in runtime.host_mut().take_log() {
            writeln!(out, "{}", serde_json::to_string(&action)?)?;
        }
    }
    Ok(())
}

fn run() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if config.trace_level.is_some() {
        match panenav::observability::init_tracing(&config) {
            Ok(path) => tracing::debug!(trace_file = %path.display(), "tracing initialized"),
            Err(e) => eprintln!("panenav: tracing disabled: {e}"),
        }
    }

    let mut runtime = Runtime::new(panenav::initialize(&config), RecordingHost::new());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &args.script {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            replay(BufReader::new(file), &mut runtime, &mut out)
        }
        None => replay(std::io::stdin().lock(), &mut runtime, &mut out),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("panenav: {e}");
            ExitCode::FAILURE
        }
    }
}
