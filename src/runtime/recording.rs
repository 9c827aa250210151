//! In-memory host that records every command it receives.
//!
//! Used by the replay binary and by tests. Lookups are served from maps seeded
//! with [`RecordingHost::add_note`] and [`RecordingHost::add_book`]; every
//! executed command is appended to the log as the [`Action`] that caused it.

use super::host::{Chrome, ContentStore, PaneManager, SurfaceHost};
use crate::app::action_mode::{ActionDescriptor, SurfaceCommand, SurfaceId};
use crate::app::actions::{Action, PendingImport};
use crate::app::modes::{Pane, PaneKind};
use crate::app::title_bar::TitleText;
use crate::domain::error::Result;
use crate::domain::{BookId, NoteId, NoteRef, PaneNavError};
use crate::shelf::ShelfCommand;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RecordingHost {
    notes: HashMap<NoteId, NoteRef>,
    books: HashMap<BookId, String>,
    /// Displayed panes, oldest first. `show` without back stack replaces the top.
    stack: Vec<Pane>,
    needs_confirmation: bool,
    reject_shelf: bool,
    log: Vec<Action>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_note(&mut self, note: NoteRef) {
        self.notes.insert(note.id, note);
    }

    pub fn add_book(&mut self, id: BookId, name: impl Into<String>) {
        self.books.insert(id, name.into());
    }

    pub fn set_needs_confirmation(&mut self, needs_confirmation: bool) {
        self.needs_confirmation = needs_confirmation;
    }

    /// Makes every content store command fail, as if the store were gone.
    pub fn set_reject_shelf(&mut self, reject: bool) {
        self.reject_shelf = reject;
    }

    #[must_use]
    pub fn log(&self) -> &[Action] {
        &self.log
    }

    /// Drains the log.
    pub fn take_log(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.log)
    }

    /// Panes shown so far, in order.
    #[must_use]
    pub fn shown(&self) -> Vec<Pane> {
        self.log
            .iter()
            .filter_map(|action| match action {
                Action::Show { pane, .. } => Some(pane.clone()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn back_stack_depth(&self) -> usize {
        self.stack.len()
    }
}

impl PaneManager for RecordingHost {
    fn show(&mut self, pane: &Pane, add_to_backstack: bool) -> Result<()> {
        if !add_to_backstack {
            self.stack.pop();
        }
        self.stack.push(pane.clone());
        self.log.push(Action::Show {
            pane: pane.clone(),
            add_to_backstack,
        });
        Ok(())
    }

    fn clear_all(&mut self) -> Result<()> {
        self.stack.clear();
        self.log.push(Action::ClearPanes);
        Ok(())
    }

    fn visible_pane(&self) -> Option<Pane> {
        self.stack.last().cloned()
    }

    fn navigate_back(&mut self) {
        self.stack.pop();
        self.log.push(Action::NavigateBack);
    }

    fn needs_confirmation(&self) -> bool {
        self.needs_confirmation
    }
}

impl ContentStore for RecordingHost {
    fn note(&self, id: NoteId) -> Option<NoteRef> {
        self.notes.get(&id).copied()
    }

    fn book_name(&self, id: BookId) -> Option<String> {
        self.books.get(&id).cloned()
    }

    fn post(&mut self, command: &ShelfCommand) -> Result<()> {
        if self.reject_shelf {
            return Err(PaneNavError::Host(format!(
                "content store unavailable for {}",
                command.name()
            )));
        }
        self.log.push(Action::PostToShelf(command.clone()));
        Ok(())
    }
}

impl SurfaceHost for RecordingHost {
    fn start_surface(&mut self, surface: SurfaceId, descriptor: &ActionDescriptor) -> Result<()> {
        self.log.push(Action::Surface {
            command: SurfaceCommand::Start {
                surface,
                descriptor: descriptor.clone(),
            },
        });
        Ok(())
    }

    fn invalidate_surface(&mut self, surface: SurfaceId, count: usize) {
        self.log.push(Action::Surface {
            command: SurfaceCommand::Invalidate { surface, count },
        });
    }

    fn finish_surface(&mut self, surface: SurfaceId) {
        self.log.push(Action::Surface {
            command: SurfaceCommand::Finish { surface },
        });
    }
}

impl Chrome for RecordingHost {
    fn set_title(&mut self, text: &TitleText) {
        self.log.push(Action::SetTitle { text: text.clone() });
    }

    fn apply_pane_chrome(&mut self, kind: PaneKind, selection_count: usize) {
        self.log.push(Action::ApplyPaneChrome {
            kind,
            selection_count,
        });
    }

    fn set_options_menu_visible(&mut self, visible: bool) {
        self.log.push(Action::InvalidateOptionsMenu { visible });
    }

    fn close_keyboard(&mut self) {
        self.log.push(Action::CloseKeyboard);
    }

    fn open_drawer(&mut self) {
        self.log.push(Action::OpenDrawer);
    }

    fn close_drawer(&mut self) {
        self.log.push(Action::CloseDrawer);
    }

    fn collapse_search(&mut self) {
        self.log.push(Action::CollapseSearch);
    }

    fn set_search_query(&mut self, query: &str) {
        self.log.push(Action::SetSearchQuery {
            query: query.to_string(),
        });
    }

    fn notify(&mut self, message: &str) {
        self.log.push(Action::Notify {
            message: message.to_string(),
        });
    }

    fn prompt_import(&mut self, import: &PendingImport) {
        self.log.push(Action::PromptImport {
            import: import.clone(),
        });
    }
}
