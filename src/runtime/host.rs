//! Host collaborator abstractions.
//!
//! The coordinator never owns panes, surfaces or notes. It talks to three
//! collaborators supplied by the embedding host:
//!
//! - [`PaneManager`]: displays panes and reports whether the visible one
//!   holds unsaved edits
//! - [`ContentStore`]: read-only lookups plus fire-and-forget commands
//! - [`SurfaceHost`]: creates and finishes contextual action surfaces
//!
//! plus [`Chrome`] for the title bar, drawer, search box, keyboard and
//! notifications. A type implementing all four is a [`Host`].

use crate::app::action_mode::{ActionDescriptor, SurfaceId};
use crate::app::actions::PendingImport;
use crate::app::modes::{Pane, PaneKind};
use crate::app::title_bar::TitleText;
use crate::domain::error::Result;
use crate::domain::{BookId, NoteId, NoteRef};
use crate::shelf::ShelfCommand;

/// Read-only host probes used while handling an event.
pub trait HostQuery {
    fn visible_pane(&self) -> Option<Pane>;
    fn note(&self, id: NoteId) -> Option<NoteRef>;
    fn book_name(&self, id: BookId) -> Option<String>;
    fn pane_needs_confirmation(&self) -> bool;
}

pub trait PaneManager {
    /// Displays `pane`, optionally pushing the transition on the back stack.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot display the pane.
    fn show(&mut self, pane: &Pane, add_to_backstack: bool) -> Result<()>;

    /// Removes every pane.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses to clear its pane stack.
    fn clear_all(&mut self) -> Result<()>;

    /// Pane currently on screen, if the host knows it.
    fn visible_pane(&self) -> Option<Pane>;

    /// Pops the back stack, or leaves the host if it is empty.
    fn navigate_back(&mut self);

    /// Whether the visible pane has unsaved edits and handles back itself.
    fn needs_confirmation(&self) -> bool;
}

pub trait ContentStore {
    fn note(&self, id: NoteId) -> Option<NoteRef>;
    fn book_name(&self, id: BookId) -> Option<String>;

    /// Posts a command. Outcomes come back later as
    /// [`Event::ShelfResponse`](crate::app::Event::ShelfResponse).
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be queued.
    fn post(&mut self, command: &ShelfCommand) -> Result<()>;
}

pub trait SurfaceHost {
    /// # Errors
    ///
    /// Returns an error if the surface could not be created.
    fn start_surface(&mut self, surface: SurfaceId, descriptor: &ActionDescriptor) -> Result<()>;

    fn invalidate_surface(&mut self, surface: SurfaceId, count: usize);

    /// Asks the surface to close. The host later reports the close as
    /// [`Event::ActionSurfaceClosed`](crate::app::Event::ActionSurfaceClosed).
    fn finish_surface(&mut self, surface: SurfaceId);
}

pub trait Chrome {
    fn set_title(&mut self, text: &TitleText);
    fn apply_pane_chrome(&mut self, kind: PaneKind, selection_count: usize);
    fn set_options_menu_visible(&mut self, visible: bool);
    fn close_keyboard(&mut self);
    fn open_drawer(&mut self);
    fn close_drawer(&mut self);
    fn collapse_search(&mut self);
    fn set_search_query(&mut self, query: &str);
    fn notify(&mut self, message: &str);
    fn prompt_import(&mut self, import: &PendingImport);
}

/// Everything the runtime needs from its embedding host.
pub trait Host: PaneManager + ContentStore + SurfaceHost + Chrome {}

impl<T: PaneManager + ContentStore + SurfaceHost + Chrome> Host for T {}

impl<T: PaneManager + ContentStore> HostQuery for T {
    fn visible_pane(&self) -> Option<Pane> {
        PaneManager::visible_pane(self)
    }

    fn note(&self, id: NoteId) -> Option<NoteRef> {
        ContentStore::note(self, id)
    }

    fn book_name(&self, id: BookId) -> Option<String> {
        ContentStore::book_name(self, id)
    }

    fn pane_needs_confirmation(&self) -> bool {
        self.needs_confirmation()
    }
}
