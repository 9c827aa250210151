//! Coordinator state container.
//!
//! [`AppState`] owns every component of the coordinator and is the single
//! source of truth for transient navigation state. It is mutated only by
//! [`handle_event`](super::handle_event).
//!
//! # State Components
//!
//! - **Drawer**: slide debouncer and logical open flag (process-scoped)
//! - **Title bar**: saved and visible titles (process-scoped)
//! - **Router**: identity of the pane displayed last
//! - **List pane**: selection of the visible list pane, dropped on pane change
//! - **Action mode**: contextual surface lifecycle
//! - **Pending import**: document waiting for the next resume
//! - **Epoch**: host liveness counter used to expire scheduled tasks
//!
//! # Example
//!
//! ```rust
//! use panenav::{AppState, Config};
//!
//! let state = AppState::new(&Config::default());
//! assert!(!state.drawer.is_open());
//! assert_eq!(state.selection_count(), 0);
//! ```

use super::action_mode::{ActionDescriptor, ActionModeController};
use super::actions::PendingImport;
use super::drawer::DrawerSlideState;
use super::modes::Pane;
use super::router::NavigationRouter;
use super::selection::SelectionModel;
use super::title_bar::TitleBarState;
use crate::Config;

/// Selection owned by the currently visible list pane.
#[derive(Debug, Clone)]
pub struct ListPane {
    pub pane: Pane,
    pub selection: SelectionModel,
}

impl ListPane {
    #[must_use]
    pub fn new(pane: Pane) -> Self {
        Self {
            pane,
            selection: SelectionModel::new(),
        }
    }

    /// Fallback action descriptor for this pane's kind.
    #[must_use]
    pub fn default_descriptor(&self) -> Option<ActionDescriptor> {
        ActionDescriptor::for_pane(self.pane.kind())
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Click toggles selection and long click opens, instead of the reverse.
    pub reverse_note_click: bool,

    pub drawer: DrawerSlideState,
    pub title_bar: TitleBarState,
    pub router: NavigationRouter,

    /// `None` while a non-list pane (or nothing) is visible.
    pub list: Option<ListPane>,

    pub action_mode: ActionModeController,

    /// Consumed exactly once, on the next resume.
    pub pending_import: Option<PendingImport>,

    /// A promote/demote/move was requested since the last surface closed.
    pub structural_move_requested: bool,

    /// Incremented whenever the host is torn down.
    pub epoch: u64,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            reverse_note_click: config.reverse_note_click,
            drawer: DrawerSlideState::new(),
            title_bar: TitleBarState::new(config.default_title.clone()),
            router: NavigationRouter::new(),
            list: None,
            action_mode: ActionModeController::new(),
            pending_import: None,
            structural_move_requested: false,
            epoch: 0,
        }
    }

    #[must_use]
    pub fn selection_count(&self) -> usize {
        self.list.as_ref().map_or(0, |list| list.selection.count())
    }

    /// Replaces the list pane for a newly visible pane.
    ///
    /// The previous selection is dropped; a fresh one is created only for list
    /// panes.
    pub fn replace_list_pane(&mut self, pane: &Pane) {
        self.list = pane.kind().is_list().then(|| ListPane::new(pane.clone()));
    }
}
