//! Application layer: the navigation and selection coordinator.
//!
//! ```text
//! Host signals → Events → handle_event → component transitions → Actions → Host
//!                   ↑                                               │
//!                   └──────── broadcasts, scheduled tasks ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the event handler
//! - [`handler`]: event processing and transition coordination
//! - [`state`]: the coordinator state container
//! - [`modes`]: pane identities and kinds
//! - [`selection`]: per-pane set of selected entries
//! - [`action_mode`]: contextual action surface lifecycle
//! - [`drawer`]: slide-gesture debouncer
//! - [`router`]: request normalization and routing
//! - [`title_bar`]: title save/restore around the drawer

pub mod action_mode;
pub mod actions;
pub mod drawer;
pub mod handler;
pub mod modes;
pub mod router;
pub mod selection;
pub mod state;
pub mod title_bar;

pub use actions::{Action, PendingImport, ScheduledTask};
pub use handler::{handle_event, Event};
pub use modes::{Pane, PaneKind};
pub use state::AppState;
