//! Dotted search-query expressions.
//!
//! The search box speaks a compact "dotted" syntax (`b.Inbox`, `t.work`,
//! `.it.done`). The coordinator never parses queries; it only generates the
//! book-scoping expression used to pre-fill the search box when searching from
//! inside a book.

pub mod dotted;

pub use dotted::{book_scope, quote};
