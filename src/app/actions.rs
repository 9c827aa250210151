//! Actions representing side effects to be executed by the host runtime.
//!
//! The event handler never touches panes, surfaces or the content store
//! directly. It returns a `Vec<Action>` per event and the
//! [`Runtime`](crate::runtime::Runtime) executes them in order against the
//! host collaborators. Scheduled tasks and broadcasts re-enter the same
//! single-threaded queue instead of reaching the host.
//!
//! # Example
//!
//! ```rust
//! use panenav::app::Action;
//! use panenav::app::modes::Pane;
//! use panenav::shelf::ShelfCommand;
//!
//! let actions = vec![
//!     Action::Show { pane: Pane::Filters, add_to_backstack: true },
//!     Action::PostToShelf(ShelfCommand::sync_on_resume()),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use super::action_mode::SurfaceCommand;
use super::modes::{Pane, PaneKind};
use super::router::{Intent, Request};
use super::title_bar::TitleText;
use crate::shelf::ShelfCommand;
use serde::{Deserialize, Serialize};

/// A document waiting to be imported on the next resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingImport {
    pub uri: String,
    /// Book name guessed from the URI, pre-filled in the "import as" prompt.
    pub suggested_name: Option<String>,
    /// Unix time in milliseconds when the document arrived.
    pub received_at: i64,
}

impl PendingImport {
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        Self {
            suggested_name: crate::infrastructure::guess_book_name(&uri),
            uri,
            received_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Deferred work that re-enters the event loop after a delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Host epoch at scheduling time. A task from an older epoch is stale.
    pub epoch: u64,
    pub request: Request,
}

/// Commands for the host collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Display a pane through the pane manager.
    Show { pane: Pane, add_to_backstack: bool },

    /// Drop every pane from the pane manager.
    ClearPanes,

    /// Start, invalidate or finish the contextual action surface.
    Surface { command: SurfaceCommand },

    /// Apply a title/subtitle pair to the visible title bar.
    SetTitle { text: TitleText },

    /// Colours, drawer highlight and floating action button for a pane.
    ApplyPaneChrome { kind: PaneKind, selection_count: usize },

    /// Re-evaluate options-menu item visibility (hidden while the drawer is open).
    InvalidateOptionsMenu { visible: bool },

    CloseKeyboard,
    OpenDrawer,
    CloseDrawer,

    /// Collapse the search box after a submission.
    CollapseSearch,
    /// Replace the search box text.
    SetSearchQuery { query: String },

    /// Default back navigation (pop the pane back stack or leave).
    NavigateBack,

    /// Run `task` after `delay_ms` on the event loop.
    Schedule { delay_ms: u64, task: ScheduledTask },

    /// Re-enter the event loop as a runtime broadcast.
    Broadcast { intent: Intent },

    /// Fire-and-forget command for the content store.
    PostToShelf(ShelfCommand),

    /// Transient user notification.
    Notify { message: String },

    /// Ask the user which name to import a document under.
    PromptImport { import: PendingImport },
}
