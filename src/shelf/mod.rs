//! Command surface of the content store.
//!
//! The Shelf owns notes, books and saved filters. The coordinator talks to it
//! through fire-and-forget [`ShelfCommand`]s and hears back through
//! [`ShelfResponse`]s. Read-only lookups go through
//! [`crate::runtime::HostQuery::note`].

pub mod messages;

pub use messages::{Place, ShelfCommand, ShelfResponse, TraceContext};
