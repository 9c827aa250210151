//! panenav: navigation, multi-selection and contextual-action coordination
//! for multi-pane note outliners.
//!
//! The crate decides which pane is shown, keeps the selection of the visible
//! list pane, drives the contextual action surface from that selection,
//! debounces the navigation drawer's slide gesture and keeps the title bar
//! consistent while the drawer covers it. Panes, the content store and the
//! action surface itself belong to the embedding host.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host / replay shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │ events
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← Event queue
//! │  - Action execution against host traits             │  ← Scheduler
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Pure state machine
//! │  - Router, selection, action mode                   │
//! │  - Drawer debouncer, title bar                      │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Shelf         │   │ Query         │   │ Infrastructure│
//! │ (shelf/)      │   │ (query/)      │   │ (paths, URIs) │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use panenav::app::router::Intent;
//! use panenav::domain::{BookId, NoteId, NoteRef};
//! use panenav::runtime::{RecordingHost, Runtime};
//! use panenav::{initialize, Config, Event, Pane};
//!
//! let mut host = RecordingHost::new();
//! host.add_note(NoteRef { id: NoteId(42), book_id: BookId(7) });
//!
//! let mut runtime = Runtime::new(initialize(&Config::default()), host);
//! runtime.dispatch(Event::ColdStart { intent: Intent { book_id: 7, note_id: 42, ..Intent::main() } });
//!
//! assert_eq!(
//!     runtime.host().shown().last(),
//!     Some(&Pane::Note { book_id: BookId(7), note_id: NoteId(42) })
//! );
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod query;
pub mod runtime;
pub mod shelf;

pub use app::{handle_event, Action, AppState, Event, Pane, PaneKind};
pub use domain::{PaneNavError, Result};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Title shown while no pane has announced one, and while the drawer is open.
pub const DEFAULT_TITLE: &str = "Notes";

/// Coordinator configuration.
///
/// Loaded from a flat settings map provided by the host, or from a TOML file:
///
/// ```toml
/// default_title = "Orgs"
/// reverse_note_click = true
/// data_dir = "~/.local/share/panenav"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub default_title: String,

    /// Click selects and long click opens, instead of the reverse.
    pub reverse_note_click: bool,

    /// Where the trace file is written. Default: `~/.local/share/panenav`
    pub data_dir: Option<String>,

    /// Tracing filter directive (`trace`, `debug`, `info`, ...). Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            reverse_note_click: false,
            data_dir: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a host-provided settings map.
    ///
    /// Unknown keys are ignored and unparseable values fall back to defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use panenav::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("reverse_note_click".to_string(), "true".to_string());
    /// map.insert("default_title".to_string(), "  ".to_string());
    ///
    /// let config = Config::from_settings(&map);
    /// assert!(config.reverse_note_click);
    /// assert_eq!(config.default_title, "Notes");
    /// ```
    #[must_use]
    pub fn from_settings(settings: &BTreeMap<String, String>) -> Self {
        let default_title = settings
            .get("default_title")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map_or_else(|| DEFAULT_TITLE.to_string(), String::from);

        let reverse_note_click = settings
            .get("reverse_note_click")
            .and_then(|s| s.trim().parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            default_title,
            reverse_note_click,
            data_dir: settings.get("data_dir").cloned(),
            trace_level: settings.get("trace_level").cloned(),
        }
    }

    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PaneNavError::Toml`] for malformed documents or unknown keys,
    /// and [`PaneNavError::Config`] for an empty `default_title`.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        if config.default_title.trim().is_empty() {
            return Err(PaneNavError::Config(
                "default_title must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PaneNavError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// The data directory with `~` expanded.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        infrastructure::data_dir(self.data_dir.as_deref())
    }
}

/// Creates the coordinator state for `config`.
///
/// Does not install tracing; call [`observability::init_tracing`] first if
/// spans should be exported.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        default_title = %config.default_title,
        reverse_note_click = config.reverse_note_click,
        "initializing coordinator"
    );
    AppState::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_only_given_keys() {
        let config = Config::from_toml_str("reverse_note_click = true\n").unwrap();
        assert!(config.reverse_note_click);
        assert_eq!(config.default_title, DEFAULT_TITLE);
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn toml_rejects_unknown_keys_and_empty_title() {
        assert!(matches!(
            Config::from_toml_str("scan_depth = 4"),
            Err(PaneNavError::Toml(_))
        ));
        assert!(matches!(
            Config::from_toml_str("default_title = \"\""),
            Err(PaneNavError::Config(_))
        ));
    }

    #[test]
    fn settings_with_garbage_fall_back_to_defaults() {
        let settings = BTreeMap::from([
            ("reverse_note_click".to_string(), "yes please".to_string()),
            ("trace_level".to_string(), "debug".to_string()),
        ]);
        let config = Config::from_settings(&settings);
        assert!(!config.reverse_note_click);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }
}
