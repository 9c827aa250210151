//! Domain layer: identifiers, lookup records and errors.
//!
//! These types are independent of any pane toolkit or content store and are
//! shared by the application layer, the Shelf command surface and the runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`ids`]: Identifier newtypes and the [`NoteRef`] lookup record
//!
//! # Examples
//!
//! ```
//! use panenav::domain::{BookId, NoteId, NoteRef};
//!
//! let note = NoteRef { id: NoteId(42), book_id: BookId(7) };
//! assert_eq!(BookId::from_raw(0), None);
//! assert_eq!(note.book_id.get(), 7);
//! ```

pub mod error;
pub mod ids;

pub use error::{PaneNavError, Result};
pub use ids::{BookId, FilterId, ItemId, NoteId, NoteRef};
