//! Event handling and state transition logic.
//!
//! Every signal the coordinator reacts to (host lifecycle, pane
//! announcements, drawer gestures, clicks, broadcasts, content store
//! responses, scheduled tasks) arrives as one [`Event`]. [`handle_event`]
//! mutates [`AppState`] and returns the actions to execute, in order.
//!
//! # Architecture
//!
//! 1. The runtime receives an event from the host or from its own queue
//! 2. [`handle_event`] pattern-matches the event type
//! 3. Components in [`AppState`] compute the transition
//! 4. Actions are collected and returned for execution
//!
//! The handler only reads from the host through [`HostQuery`]. All writes go
//! through the returned actions.
//!
//! # Example
//!
//! ```rust
//! use panenav::app::{handle_event, Action, AppState, Event};
//! use panenav::runtime::RecordingHost;
//! use panenav::Config;
//!
//! let mut state = AppState::new(&Config::default());
//! let host = RecordingHost::new();
//! let (_, actions) = handle_event(&mut state, &host, &Event::DrawerSlide { offset: 0.4 })?;
//! assert!(actions.contains(&Action::CloseKeyboard));
//! # Ok::<(), panenav::PaneNavError>(())
//! ```

use super::action_mode::{ActionDescriptor, SurfaceId, SurfaceTag};
use super::actions::{Action, PendingImport, ScheduledTask};
use super::drawer::DrawerEdge;
use super::modes::Pane;
use super::router::{BackOutcome, DrawerItem, Intent, NavigationRouter, Request, DRAWER_CLOSE_DELAY};
use super::state::AppState;
use crate::domain::error::Result;
use crate::domain::{BookId, ItemId, NoteId};
use crate::runtime::HostQuery;
use crate::shelf::{ShelfCommand, ShelfResponse};
use serde::{Deserialize, Serialize};

/// Events delivered to the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// The host was created with its launch intent.
    ColdStart { intent: Intent },

    /// The host came to the foreground.
    Resumed {
        /// No book has ever been opened; the drawer is opened to guide the user.
        #[serde(default)]
        first_run: bool,
    },

    /// The host was torn down. Pending scheduled tasks and surfaces expire.
    HostDestroyed,

    /// Runtime broadcast addressed to the coordinator.
    Broadcast { intent: Intent },

    /// Raw broadcast payload. Malformed payloads are ignored.
    BroadcastPayload { payload: String },

    /// In-app navigation request (toolbar, pane buttons).
    Navigate { request: Request },

    /// One drawer slide sample, `0.0` closed to `1.0` open.
    DrawerSlide { offset: f32 },

    DrawerItemClicked { item: DrawerItem },

    BackPressed,

    /// The search box was expanded.
    SearchOpened,

    SearchSubmitted { query: String },

    /// A pane became visible and reports its identity and title.
    PaneAnnounced {
        pane: Pane,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        subtitle: Option<String>,
    },

    /// The host removed every pane.
    PanesCleared,

    NoteClicked { note_id: NoteId },
    NoteLongClicked { note_id: NoteId },

    /// Selection toggle on a list entry (book, note or filter).
    ItemToggled {
        item_id: ItemId,
        /// Surface capabilities for this selection. Defaults to the pane's own.
        #[serde(default)]
        descriptor: Option<ActionDescriptor>,
    },

    /// The visible pane dropped its selection (after delete, cut).
    SelectionCleared,

    /// Show a note inside its book outline, unfolding the path to it.
    NoteScrollRequested { note_id: NoteId },

    /// A book entry in the books list was clicked.
    BookClicked { book_id: BookId },

    /// The host destroyed a contextual action surface.
    ActionSurfaceClosed { surface: SurfaceId },

    /// A pane asks the content store to run a command.
    ShelfRequest { command: ShelfCommand },

    ShelfResponse { response: ShelfResponse },

    /// A document was picked for import.
    FileChosen { uri: String },

    /// The user confirmed the import prompt.
    ImportConfirmed { name: String, uri: String },

    /// A task scheduled earlier came due.
    ScheduledTaskFired { task: ScheduledTask },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag reports whether the coordinator's own state changed.
///
/// # Errors
///
/// Currently infallible; the signature leaves room for host query failures.
#[allow(clippy::too_many_lines)]
pub fn handle_event(
    state: &mut AppState,
    host: &dyn HostQuery,
    event: &Event,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::ColdStart { intent } => {
            let plan = NavigationRouter::cold_start(intent);
            if let Some(uri) = plan.import_uri {
                tracing::debug!(%uri, "import requested at launch");
                state.pending_import = Some(PendingImport::new(uri));
            }
            let actions = plan.requests.iter().map(show).collect();
            Ok((true, actions))
        }
        Event::Resumed { first_run } => {
            let mut actions = vec![];

            if let Some(import) = state.pending_import.take() {
                actions.push(Action::PromptImport { import });
            }

            actions.push(Action::PostToShelf(ShelfCommand::sync_on_resume()));

            if *first_run {
                state.drawer.mark_open();
                actions.push(Action::OpenDrawer);
            }
            Ok((true, actions))
        }
        Event::HostDestroyed => {
            state.epoch += 1;
            state.router.reset();
            state.list = None;
            state.action_mode.reset();
            state.structural_move_requested = false;
            tracing::debug!(epoch = state.epoch, "host destroyed");
            Ok((true, vec![]))
        }
        Event::Broadcast { intent } => {
            let actions = NavigationRouter::from_broadcast(intent)
                .map(|request| vec![show(&request)])
                .unwrap_or_default();
            Ok((false, actions))
        }
        Event::BroadcastPayload { payload } => match serde_json::from_str::<Intent>(payload) {
            Ok(intent) => handle_event(state, host, &Event::Broadcast { intent }),
            Err(error) => {
                tracing::debug!(%error, "ignoring malformed broadcast payload");
                Ok((false, vec![]))
            }
        },
        Event::Navigate { request } => Ok((false, vec![show(request)])),
        Event::DrawerSlide { offset } => {
            let actions = match state.drawer.on_slide(*offset) {
                Some(DrawerEdge::Opened) => vec![
                    Action::InvalidateOptionsMenu { visible: false },
                    Action::SetTitle {
                        text: state.title_bar.on_drawer_opened(),
                    },
                    Action::CloseKeyboard,
                ],
                Some(DrawerEdge::Closed) => vec![
                    Action::InvalidateOptionsMenu { visible: true },
                    Action::SetTitle {
                        text: state.title_bar.on_drawer_closed(),
                    },
                ],
                None => return Ok((false, vec![])),
            };
            Ok((true, actions))
        }
        Event::DrawerItemClicked { item } => {
            let request = NavigationRouter::drawer_request(item);
            tracing::debug!(?request, "drawer item clicked, delaying until drawer closes");

            let mut actions = vec![];
            let mut changed = false;
            // A book item may point at the book already shown.
            if !matches!(item, DrawerItem::Book { .. }) {
                if let Some(command) = state.action_mode.finish() {
                    changed = true;
                    actions.push(Action::Surface { command });
                    if let Some(list) = state.list.as_mut() {
                        list.selection.clear();
                        actions.push(Action::ApplyPaneChrome {
                            kind: list.pane.kind(),
                            selection_count: 0,
                        });
                    }
                }
            }

            actions.push(Action::CloseDrawer);
            actions.push(schedule(
                DRAWER_CLOSE_DELAY.as_millis(),
                ScheduledTask {
                    epoch: state.epoch,
                    request,
                },
            ));
            Ok((changed, actions))
        }
        Event::ScheduledTaskFired { task } => {
            if task.epoch != state.epoch {
                tracing::debug!(
                    task_epoch = task.epoch,
                    epoch = state.epoch,
                    "dropping scheduled task of destroyed host"
                );
                return Ok((false, vec![]));
            }
            Ok((false, vec![show(&task.request)]))
        }
        Event::BackPressed => {
            let outcome = NavigationRouter::back(state.drawer.is_open(), || host.pane_needs_confirmation());
            tracing::debug!(?outcome, "back pressed");

            match outcome {
                BackOutcome::DrawerClosed => {
                    state.drawer.mark_closed();
                    Ok((true, vec![Action::CloseDrawer]))
                }
                BackOutcome::DeferredToPane => Ok((false, vec![])),
                BackOutcome::Propagate => Ok((false, vec![Action::NavigateBack])),
            }
        }
        Event::SearchOpened => {
            let visible = host.visible_pane();
            let query = state
                .router
                .search_prefill(visible.as_ref(), |book_id| host.book_name(book_id));
            Ok((false, vec![Action::SetSearchQuery { query }]))
        }
        Event::SearchSubmitted { query } => {
            let request = Request::OpenQuery { query: query.clone() };
            Ok((false, vec![Action::CollapseSearch, show(&request)]))
        }
        Event::PaneAnnounced {
            pane,
            title,
            subtitle,
        } => {
            let mut actions = vec![];

            if state.router.on_pane_announced(pane) {
                if let Some(command) = state.action_mode.finish() {
                    actions.push(Action::Surface { command });
                }
                state.replace_list_pane(pane);
            }

            if let Some(text) =
                state
                    .title_bar
                    .announce(title.as_deref(), subtitle.as_deref(), state.drawer.is_open())
            {
                actions.push(Action::SetTitle { text });
            }

            actions.push(Action::ApplyPaneChrome {
                kind: pane.kind(),
                selection_count: state.selection_count(),
            });
            Ok((true, actions))
        }
        Event::PanesCleared => {
            state.router.reset();
            state.list = None;
            let actions = state
                .action_mode
                .finish()
                .map(|command| vec![Action::Surface { command }])
                .unwrap_or_default();
            Ok((true, actions))
        }
        Event::NoteClicked { note_id } => {
            if state.reverse_note_click || state.selection_count() > 0 {
                Ok(toggle(state, ItemId::from(*note_id), None))
            } else {
                Ok(open_note(state, host, *note_id))
            }
        }
        Event::NoteLongClicked { note_id } => {
            if state.reverse_note_click {
                Ok(open_note(state, host, *note_id))
            } else {
                Ok(toggle(state, ItemId::from(*note_id), None))
            }
        }
        Event::ItemToggled {
            item_id,
            descriptor,
        } => Ok(toggle(state, *item_id, descriptor.as_ref())),
        Event::SelectionCleared => {
            let Some(list) = state.list.as_mut() else {
                return Ok((false, vec![]));
            };
            list.selection.clear();
            let kind = list.pane.kind();

            let mut actions = vec![];
            if let Some(command) = state.action_mode.finish() {
                actions.push(Action::Surface { command });
            }
            actions.push(Action::ApplyPaneChrome {
                kind,
                selection_count: 0,
            });
            Ok((true, actions))
        }
        Event::NoteScrollRequested { note_id } => {
            let Some(note) = host.note(*note_id) else {
                tracing::debug!(%note_id, "note to scroll to not found");
                return Ok((false, vec![]));
            };
            Ok((
                false,
                vec![
                    Action::PostToShelf(ShelfCommand::sparse_tree(note.book_id, note.id)),
                    show(&Request::OpenBook {
                        book_id: note.book_id,
                        note_id: Some(note.id),
                    }),
                ],
            ))
        }
        Event::BookClicked { book_id } => Ok((
            false,
            vec![Action::Broadcast {
                intent: Intent::open_book(book_id.get()),
            }],
        )),
        Event::ActionSurfaceClosed { surface } => {
            let Some(closed) = state.action_mode.on_closed(*surface) else {
                state.structural_move_requested = false;
                return Ok((false, vec![]));
            };

            let mut actions = vec![];

            if closed.tag == Some(SurfaceTag::Move) && state.structural_move_requested {
                actions.push(Action::PostToShelf(ShelfCommand::sync_on_note_update()));
            }
            state.structural_move_requested = false;

            if closed.host_initiated {
                if let Some(list) = state.list.as_mut() {
                    list.selection.clear();
                    actions.push(Action::ApplyPaneChrome {
                        kind: list.pane.kind(),
                        selection_count: 0,
                    });
                }
            }
            Ok((true, actions))
        }
        Event::ShelfRequest { command } => {
            if command.is_structural() {
                state.structural_move_requested = true;
            }
            tracing::debug!(command = command.name(), "forwarding pane command");
            Ok((false, vec![Action::PostToShelf(command.clone())]))
        }
        Event::ShelfResponse { response } => {
            let mut actions: Vec<Action> = notification(response)
                .map(|message| vec![Action::Notify { message }])
                .unwrap_or_default();

            if let ShelfResponse::BookDeleted { book_id } = response {
                if state.router.current().and_then(Pane::book_id) == Some(*book_id) {
                    tracing::debug!(%book_id, "visible book deleted, returning to books list");
                    state.router.reset();
                    state.list = None;
                    if let Some(command) = state.action_mode.finish() {
                        actions.push(Action::Surface { command });
                    }
                    actions.push(Action::ClearPanes);
                    actions.push(show(&Request::OpenBooksList {
                        add_to_backstack: false,
                    }));
                    return Ok((true, actions));
                }
            }
            Ok((false, actions))
        }
        Event::FileChosen { uri } => {
            state.pending_import = Some(PendingImport::new(uri.clone()));
            Ok((true, vec![]))
        }
        Event::ImportConfirmed { name, uri } => {
            let name = name.trim();
            if name.is_empty() {
                return Ok((
                    false,
                    vec![Action::Notify {
                        message: "Name can not be empty".to_string(),
                    }],
                ));
            }
            Ok((
                false,
                vec![Action::PostToShelf(ShelfCommand::import_book(
                    name.to_string(),
                    uri.clone(),
                ))],
            ))
        }
    }
}

fn show(request: &Request) -> Action {
    let (pane, add_to_backstack) = request.target();
    Action::Show {
        pane,
        add_to_backstack,
    }
}

fn schedule(delay_ms: u128, task: ScheduledTask) -> Action {
    Action::Schedule {
        delay_ms: u64::try_from(delay_ms).unwrap_or(u64::MAX),
        task,
    }
}

fn open_note(state: &mut AppState, host: &dyn HostQuery, note_id: NoteId) -> (bool, Vec<Action>) {
    let Some(note) = host.note(note_id) else {
        tracing::debug!(%note_id, "clicked note not found");
        return (false, vec![]);
    };

    let mut actions = vec![];
    if let Some(command) = state.action_mode.finish() {
        actions.push(Action::Surface { command });
    }
    actions.push(show(&Request::OpenNote {
        book_id: note.book_id,
        note_id: note.id,
    }));
    (true, actions)
}

fn toggle(
    state: &mut AppState,
    item_id: ItemId,
    descriptor: Option<&ActionDescriptor>,
) -> (bool, Vec<Action>) {
    let Some(list) = state.list.as_mut() else {
        tracing::debug!(%item_id, "selection toggle without a list pane");
        return (false, vec![]);
    };

    list.selection.toggle(item_id);
    let count = list.selection.count();
    let kind = list.pane.kind();

    let mut actions = vec![];
    let descriptor = descriptor.cloned().or_else(|| list.default_descriptor());
    if let Some(descriptor) = descriptor {
        if let Some(command) = state.action_mode.update(count, &descriptor) {
            actions.push(Action::Surface { command });
        }
    }
    actions.push(Action::ApplyPaneChrome {
        kind,
        selection_count: count,
    });
    (true, actions)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// User-facing message for a content store response, if it warrants one.
fn notification(response: &ShelfResponse) -> Option<String> {
    match response {
        ShelfResponse::NotesDeleted { count: 0 } => Some("No notes deleted".to_string()),
        ShelfResponse::NotesDeleted { count } => Some(format!("{} deleted", plural(*count, "note"))),
        ShelfResponse::NotesCut { count: 0 } => Some("No notes cut".to_string()),
        ShelfResponse::NotesCut { count } => Some(format!("{} cut", plural(*count, "note"))),
        ShelfResponse::NotesPasted { count: 0 } => Some("No notes pasted".to_string()),
        ShelfResponse::NotesPasted { count } => Some(format!("{} pasted", plural(*count, "note"))),
        ShelfResponse::BookDeleted { .. } => Some("Notebook deleted".to_string()),
        ShelfResponse::BookExported { path } => Some(format!("Notebook exported to {path}")),
        ShelfResponse::BookImported { name, .. } => Some(format!("Notebook {name} imported")),
        ShelfResponse::SyncFinished { error: Some(error) } => Some(format!("Sync failed: {error}")),
        ShelfResponse::Failed { command, message } => {
            tracing::warn!(%command, %message, "content store command failed");
            Some(message.clone())
        }
        ShelfResponse::NotesMoved { .. }
        | ShelfResponse::BookCreated { .. }
        | ShelfResponse::SyncFinished { error: None } => None,
    }
}
