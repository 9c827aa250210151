//! Pane descriptors shared by the router, the coordinator state and the host.
//!
//! A [`Pane`] is one of the mutually-exclusive content views. It doubles as the
//! target of a display command and as the identity of the pane the host reports
//! as visible. [`PaneKind`] is the parameter-free projection used for colours,
//! drawer highlighting and the floating action button.
//!
//! # Example
//!
//! ```rust
//! use panenav::app::modes::{Pane, PaneKind};
//! use panenav::domain::BookId;
//!
//! let pane = Pane::Book { book_id: BookId(7), note_id: None };
//! assert_eq!(pane.kind(), PaneKind::Book);
//! assert!(pane.kind().is_list());
//! ```

use crate::domain::{BookId, NoteId};
use serde::{Deserialize, Serialize};

/// Parameter-free classification of a pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneKind {
    /// List of all books.
    Books,
    /// Outline of one book.
    Book,
    /// Single note editor.
    Note,
    /// Notes matching a search query.
    Query,
    /// List of saved search filters.
    Filters,
    /// Application settings.
    Settings,
}

impl PaneKind {
    /// Whether the pane shows a multi-selectable list and therefore owns a
    /// selection model and an action-mode controller.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::Books | Self::Book | Self::Query | Self::Filters)
    }

    /// Whether the pane may hold unsaved edits and can veto a back navigation.
    #[must_use]
    pub const fn can_hold_edits(self) -> bool {
        matches!(self, Self::Note)
    }
}

/// A displayable pane together with the parameters that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pane", rename_all = "snake_case")]
pub enum Pane {
    Books,
    Book {
        book_id: BookId,
        /// Note to scroll to once the outline is shown. Not part of the identity.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note_id: Option<NoteId>,
    },
    Note {
        book_id: BookId,
        note_id: NoteId,
    },
    Query {
        query: String,
    },
    Filters,
    Settings,
}

impl Pane {
    #[must_use]
    pub const fn kind(&self) -> PaneKind {
        match self {
            Self::Books => PaneKind::Books,
            Self::Book { .. } => PaneKind::Book,
            Self::Note { .. } => PaneKind::Note,
            Self::Query { .. } => PaneKind::Query,
            Self::Filters => PaneKind::Filters,
            Self::Settings => PaneKind::Settings,
        }
    }

    /// Book the pane belongs to, for book and note panes.
    #[must_use]
    pub const fn book_id(&self) -> Option<BookId> {
        match self {
            Self::Book { book_id, .. } | Self::Note { book_id, .. } => Some(*book_id),
            _ => None,
        }
    }

    /// Returns `true` when both values denote the same pane instance.
    ///
    /// A book pane scrolled to a different note is still the same pane, so its
    /// selection survives the scroll.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Book { book_id: a, .. }, Self::Book { book_id: b, .. }) => a == b,
            _ => self == other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_scroll_target_is_not_identity() {
        let a = Pane::Book { book_id: BookId(1), note_id: None };
        let b = Pane::Book { book_id: BookId(1), note_id: Some(NoteId(9)) };
        let c = Pane::Book { book_id: BookId(2), note_id: None };
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
        assert_eq!(b.book_id(), Some(BookId(1)));
        assert_eq!(Pane::Filters.book_id(), None);
    }

    #[test]
    fn only_list_panes_own_selection() {
        assert!(PaneKind::Query.is_list());
        assert!(!PaneKind::Note.is_list());
        assert!(!PaneKind::Settings.is_list());
    }

    #[test]
    fn pane_serializes_with_tag() {
        let json = serde_json::to_string(&Pane::Query { query: "t.work".into() }).unwrap();
        assert_eq!(json, r#"{"pane":"query","query":"t.work"}"#);
    }
}
