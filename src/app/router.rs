//! Request routing to panes.
//!
//! The [`NavigationRouter`] normalizes every way of asking for a pane (deep-link
//! broadcasts, the cold-start launch intent, drawer clicks, search submission,
//! note clicks) into one closed set of [`Request`]s, and turns each request into
//! exactly one display command. It also answers the two questions that depend
//! on which pane was displayed last: what to pre-fill the search box with, and
//! whether a back press should reach the default back navigation.
//!
//! Routing is fire-and-forget. A request whose target cannot be located is
//! dropped without retry.
//!
//! # Example
//!
//! ```rust
//! use panenav::app::router::{Intent, NavigationRouter, Request};
//! use panenav::domain::{BookId, NoteId};
//!
//! let intent = Intent::open_note(7, 42);
//! assert_eq!(
//!     NavigationRouter::from_broadcast(&intent),
//!     Some(Request::OpenNote { book_id: BookId(7), note_id: NoteId(42) })
//! );
//! ```

use super::modes::Pane;
use crate::domain::{BookId, NoteId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay between requesting the drawer to close and switching panes.
pub const DRAWER_CLOSE_DELAY: Duration = Duration::from_millis(300);

/// Intent action names understood at the boundary.
pub mod intent_action {
    pub const OPEN_BOOK: &str = "open_book";
    pub const OPEN_NOTE: &str = "open_note";
    /// Cold start with a document to import.
    pub const VIEW: &str = "view";
    /// Plain launch, possibly with book/note/query extras.
    pub const MAIN: &str = "main";
}

/// Navigation requests. Each one maps to exactly one display command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum Request {
    OpenBook {
        book_id: BookId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note_id: Option<NoteId>,
    },
    OpenNote {
        book_id: BookId,
        note_id: NoteId,
    },
    OpenQuery {
        query: String,
    },
    OpenBooksList {
        add_to_backstack: bool,
    },
    OpenFilters,
    OpenSettings,
}

impl Request {
    /// The pane to show and whether the transition goes on the back stack.
    #[must_use]
    pub fn target(&self) -> (Pane, bool) {
        match self {
            Self::OpenBook { book_id, note_id } => (
                Pane::Book {
                    book_id: *book_id,
                    note_id: *note_id,
                },
                true,
            ),
            Self::OpenNote { book_id, note_id } => (
                Pane::Note {
                    book_id: *book_id,
                    note_id: *note_id,
                },
                true,
            ),
            Self::OpenQuery { query } => (Pane::Query { query: query.clone() }, true),
            Self::OpenBooksList { add_to_backstack } => (Pane::Books, *add_to_backstack),
            Self::OpenFilters => (Pane::Filters, true),
            Self::OpenSettings => (Pane::Settings, true),
        }
    }
}

/// A boundary intent: broadcast payload or launch intent.
///
/// Absent numeric extras default to `0`, which means "none".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub action: String,
    #[serde(default)]
    pub book_id: i64,
    #[serde(default)]
    pub note_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Opaque content URI of a document to import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Intent {
    #[must_use]
    pub fn open_book(book_id: i64) -> Self {
        Self {
            action: intent_action::OPEN_BOOK.to_string(),
            book_id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn open_note(book_id: i64, note_id: i64) -> Self {
        Self {
            action: intent_action::OPEN_NOTE.to_string(),
            book_id,
            note_id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn view(uri: impl Into<String>) -> Self {
        Self {
            action: intent_action::VIEW.to_string(),
            data: Some(uri.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn main() -> Self {
        Self {
            action: intent_action::MAIN.to_string(),
            ..Self::default()
        }
    }
}

/// Entries of the navigation drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum DrawerItem {
    Books,
    Filters,
    Settings,
    Book { book_id: BookId },
    /// Saved search filter; opens its query.
    Filter { query: String },
}

/// Outcome of a back press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// The drawer was open and has been asked to close. Nothing else happens.
    DrawerClosed,
    /// The visible pane holds unsaved edits and handles the back press itself.
    DeferredToPane,
    /// Fall through to the default back navigation.
    Propagate,
}

/// Launch plan derived from the cold-start intent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColdStart {
    /// Requests to issue, in order.
    pub requests: Vec<Request>,
    /// URI of a document the launch asked to import.
    pub import_uri: Option<String>,
}

/// Routing logic plus the identity of the pane displayed last.
#[derive(Debug, Clone, Default)]
pub struct NavigationRouter {
    current: Option<Pane>,
}

impl NavigationRouter {
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Pane that announced itself last.
    #[must_use]
    pub const fn current(&self) -> Option<&Pane> {
        self.current.as_ref()
    }

    /// Records the announced pane. Returns `true` if its identity changed.
    pub fn on_pane_announced(&mut self, pane: &Pane) -> bool {
        let changed = !self
            .current
            .as_ref()
            .is_some_and(|current| current.same_identity(pane));
        if changed {
            tracing::debug!(?pane, "visible pane changed");
        }
        self.current = Some(pane.clone());
        changed
    }

    /// Forgets the visible pane, for example after the host cleared all panes.
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Normalizes a runtime broadcast. Unknown actions and missing ids yield `None`.
    #[must_use]
    pub fn from_broadcast(intent: &Intent) -> Option<Request> {
        let request = match intent.action.as_str() {
            intent_action::OPEN_BOOK => BookId::from_raw(intent.book_id).map(|book_id| Request::OpenBook {
                book_id,
                note_id: None,
            }),
            intent_action::OPEN_NOTE => BookId::from_raw(intent.book_id)
                .zip(NoteId::from_raw(intent.note_id))
                .map(|(book_id, note_id)| Request::OpenNote { book_id, note_id }),
            _ => None,
        };

        if request.is_none() {
            tracing::debug!(action = %intent.action, "ignoring unrecognized broadcast");
        }
        request
    }

    /// Plans the initial panes for a cold start.
    ///
    /// The books list is always shown first, off the back stack. Then the
    /// requested book (and note), or the requested query.
    #[must_use]
    pub fn cold_start(intent: &Intent) -> ColdStart {
        let mut plan = ColdStart {
            requests: vec![Request::OpenBooksList {
                add_to_backstack: false,
            }],
            import_uri: None,
        };

        if intent.action == intent_action::VIEW {
            plan.import_uri = intent.data.clone();
        }

        if let Some(book_id) = BookId::from_raw(intent.book_id) {
            let note_id = NoteId::from_raw(intent.note_id);
            plan.requests.push(Request::OpenBook { book_id, note_id });
            if let Some(note_id) = note_id {
                plan.requests.push(Request::OpenNote { book_id, note_id });
            }
        } else if let Some(query) = &intent.query {
            plan.requests.push(Request::OpenQuery {
                query: query.clone(),
            });
        }

        plan
    }

    /// Maps a drawer entry to its request.
    #[must_use]
    pub fn drawer_request(item: &DrawerItem) -> Request {
        match item {
            DrawerItem::Books => Request::OpenBooksList {
                add_to_backstack: true,
            },
            DrawerItem::Filters => Request::OpenFilters,
            DrawerItem::Settings => Request::OpenSettings,
            DrawerItem::Book { book_id } => Request::OpenBook {
                book_id: *book_id,
                note_id: None,
            },
            DrawerItem::Filter { query } => Request::OpenQuery {
                query: query.clone(),
            },
        }
    }

    /// Decides what a back press does.
    ///
    /// `needs_confirmation` is only consulted when the drawer is closed.
    pub fn back(drawer_open: bool, needs_confirmation: impl FnOnce() -> bool) -> BackOutcome {
        if drawer_open {
            return BackOutcome::DrawerClosed;
        }
        if needs_confirmation() {
            return BackOutcome::DeferredToPane;
        }
        BackOutcome::Propagate
    }

    /// Text to pre-fill the search box with.
    ///
    /// `visible` is the pane the host reports as visible; it falls back to the
    /// last announced pane. A query pane yields its own query; a book pane
    /// yields an expression scoping the search to that book (when its name
    /// resolves); anything else yields an empty box. Non-empty pre-fills end
    /// with a space so the user can keep typing.
    pub fn search_prefill(
        &self,
        visible: Option<&Pane>,
        book_name: impl FnOnce(BookId) -> Option<String>,
    ) -> String {
        let prefill = match visible.or(self.current.as_ref()) {
            Some(Pane::Query { query }) => Some(query.clone()),
            Some(Pane::Book { book_id, .. }) => book_name(*book_id).map(|name| crate::query::book_scope(&name)),
            _ => None,
        };

        prefill.map_or_else(String::new, |text| format!("{text} "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_request_targets_one_pane() {
        assert_eq!(
            Request::OpenBooksList { add_to_backstack: false }.target(),
            (Pane::Books, false)
        );
        assert_eq!(
            Request::OpenNote { book_id: BookId(7), note_id: NoteId(42) }.target(),
            (Pane::Note { book_id: BookId(7), note_id: NoteId(42) }, true)
        );
        assert_eq!(Request::OpenSettings.target(), (Pane::Settings, true));
    }

    #[test]
    fn broadcasts_normalize_and_malformed_are_dropped() {
        assert_eq!(
            NavigationRouter::from_broadcast(&Intent::open_book(3)),
            Some(Request::OpenBook { book_id: BookId(3), note_id: None })
        );
        assert_eq!(NavigationRouter::from_broadcast(&Intent::open_note(3, 0)), None);
        assert_eq!(
            NavigationRouter::from_broadcast(&Intent { action: "explode".into(), ..Intent::default() }),
            None
        );
    }

    #[test]
    fn cold_start_opens_book_then_note() {
        let plan = NavigationRouter::cold_start(&Intent { book_id: 7, note_id: 42, ..Intent::main() });
        assert_eq!(
            plan.requests,
            vec![
                Request::OpenBooksList { add_to_backstack: false },
                Request::OpenBook { book_id: BookId(7), note_id: Some(NoteId(42)) },
                Request::OpenNote { book_id: BookId(7), note_id: NoteId(42) },
            ]
        );
        assert_eq!(plan.import_uri, None);
    }

    #[test]
    fn cold_start_view_intent_carries_import() {
        let plan = NavigationRouter::cold_start(&Intent::view("content://docs/todo.org"));
        assert_eq!(plan.requests.len(), 1);
        assert_eq!(plan.import_uri.as_deref(), Some("content://docs/todo.org"));
    }

    #[test]
    fn back_closes_drawer_without_probing_pane() {
        let outcome = NavigationRouter::back(true, || panic!("pane must not be probed"));
        assert_eq!(outcome, BackOutcome::DrawerClosed);
    }

    #[test]
    fn back_defers_to_confirming_pane_then_propagates() {
        assert_eq!(NavigationRouter::back(false, || true), BackOutcome::DeferredToPane);
        assert_eq!(NavigationRouter::back(false, || false), BackOutcome::Propagate);
    }

    #[test]
    fn search_prefill_depends_on_visible_pane() {
        let mut router = NavigationRouter::new();
        assert_eq!(router.search_prefill(None, |_| None), "");

        router.on_pane_announced(&Pane::Query { query: "t.work".into() });
        assert_eq!(router.search_prefill(None, |_| None), "t.work ");

        router.on_pane_announced(&Pane::Book { book_id: BookId(1), note_id: None });
        assert_eq!(router.search_prefill(None, |_| Some("Work Log".into())), "b.\"Work Log\" ");
        assert_eq!(router.search_prefill(None, |_| None), "");

        router.on_pane_announced(&Pane::Filters);
        assert_eq!(router.search_prefill(None, |_| Some("ignored".into())), "");

        let visible = Pane::Query { query: "s.today".into() };
        assert_eq!(router.search_prefill(Some(&visible), |_| None), "s.today ");
    }

    #[test]
    fn announcing_same_book_scrolled_is_not_a_change() {
        let mut router = NavigationRouter::new();
        assert!(router.on_pane_announced(&Pane::Book { book_id: BookId(1), note_id: None }));
        assert!(!router.on_pane_announced(&Pane::Book { book_id: BookId(1), note_id: Some(NoteId(5)) }));
        assert!(router.on_pane_announced(&Pane::Books));
    }
}
