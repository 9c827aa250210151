//! Error types for the pane navigation coordinator.
//!
//! This module defines the centralized error type [`PaneNavError`] and a type alias
//! [`Result`] used throughout the crate. Errors are implemented with `thiserror`.
//!
//! None of these errors are fatal to the coordinator: lookup misses, stale
//! callbacks and malformed boundary events are not errors at all and degrade to
//! "no navigation occurs". The variants below cover the ambient layers
//! (configuration, payload decoding, host execution).

use thiserror::Error;

/// The main error type for coordinator operations.
///
/// # Examples
///
/// ```
/// use panenav::PaneNavError;
///
/// fn validate(title: &str) -> Result<(), PaneNavError> {
///     if title.is_empty() {
///         return Err(PaneNavError::Config("default_title must not be empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum PaneNavError {
    /// Filesystem or I/O operation failed.
    ///
    /// Raised while reading configuration files or writing trace output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A TOML configuration document could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON boundary payload (broadcast or replay script line) could not be decoded.
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// A host collaborator refused or failed to execute a command.
    ///
    /// Raised by [`crate::runtime::Host`] implementations; the runtime logs it
    /// and carries on.
    #[error("Host error: {0}")]
    Host(String),
}

/// A specialized `Result` type for coordinator operations.
pub type Result<T> = std::result::Result<T, PaneNavError>;
