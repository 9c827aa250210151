//! Identifier newtypes and lookup records.
//!
//! Identifiers are opaque 64-bit values assigned by the content store. At the
//! boundary (launch extras, broadcasts) a value of `0` means "absent"; use
//! [`BookId::from_raw`] and friends to normalise those into `Option`.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Normalises a raw boundary value, treating non-positive ids as absent.
            #[must_use]
            pub const fn from_raw(raw: i64) -> Option<Self> {
                if raw > 0 {
                    Some(Self(raw))
                } else {
                    None
                }
            }

            /// Returns the raw identifier value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype! {
    /// Selectable list entry. In every list pane the entries are notes.
    ItemId
}

id_newtype! {
    /// Note (outline entry) identifier.
    NoteId
}

id_newtype! {
    /// Book (notebook / outline document) identifier.
    BookId
}

id_newtype! {
    /// Saved search filter identifier.
    FilterId
}

impl From<NoteId> for ItemId {
    fn from(id: NoteId) -> Self {
        Self(id.0)
    }
}

impl From<ItemId> for NoteId {
    fn from(id: ItemId) -> Self {
        Self(id.0)
    }
}

/// Result of a read-only note lookup in the content store.
///
/// Only the position data the router needs is carried: which book the note
/// lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRef {
    pub id: NoteId,
    pub book_id: BookId,
}
