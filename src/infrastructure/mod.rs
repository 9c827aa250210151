//! Infrastructure helpers for the environment the coordinator runs in.
//!
//! - [`paths`]: data directory resolution and tilde expansion
//! - [`uri`]: file-name extraction and book-name guessing for document URIs

pub mod paths;
pub mod uri;

pub use paths::{data_dir, expand_tilde};
pub use uri::guess_book_name;
